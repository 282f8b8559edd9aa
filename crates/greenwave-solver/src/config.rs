// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use greenwave_core::num::precision::Precision;

/// Configuration of a [`SpeedOptimizer`](crate::optimizer::SpeedOptimizer) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Maximum number of refinement rounds before giving up with a
    /// best-effort (degraded) result.
    pub max_iterations: u64,
    /// Rounding applied to arrival times and reported speeds.
    pub precision: Precision,
}

impl OptimizerConfig {
    pub const DEFAULT_MAX_ITERATIONS: u64 = 50;
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            precision: Precision::default(),
        }
    }
}

impl std::fmt::Display for OptimizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OptimizerConfig(max_iterations: {}, precision: {})",
            self.max_iterations,
            self.precision.decimals()
        )
    }
}

/// Builder for `OptimizerConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptimizerConfigBuilder {
    config: OptimizerConfig,
}

impl OptimizerConfigBuilder {
    /// Creates a new builder with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the iteration cap. Zero only checks the speed limit itself.
    #[inline]
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Sets the rounding precision.
    #[inline]
    pub fn precision(mut self, precision: Precision) -> Self {
        self.config.precision = precision;
        self
    }

    #[inline]
    pub fn build(self) -> OptimizerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = OptimizerConfig::default();
        assert_eq!(c.max_iterations, 50);
        assert_eq!(c.precision, Precision::new(5));
    }

    #[test]
    fn test_builder_overrides() {
        let c = OptimizerConfigBuilder::new()
            .max_iterations(7)
            .precision(Precision::new(3))
            .build();
        assert_eq!(c.max_iterations, 7);
        assert_eq!(c.precision.decimals(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            OptimizerConfig::default().to_string(),
            "OptimizerConfig(max_iterations: 50, precision: 5)"
        );
    }
}
