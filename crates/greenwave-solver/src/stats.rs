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

//! Counters collected while the optimizer runs.
//!
//! Updates are plain saturating increments so the statistics can be touched
//! every round without any measurable cost.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OptimizerStatistics {
    /// Number of refinement rounds performed.
    pub iterations: u64,

    /// Number of per-stoplight feasible intervals computed.
    pub interval_evaluations: u64,

    /// Number of rounds whose intersection fold stopped early on a
    /// stoplight that could not be satisfied together with the previous ones.
    pub short_circuits: u64,

    /// Wall-clock time of the whole run.
    pub solve_duration: Duration,
}

impl OptimizerStatistics {
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    #[inline]
    pub fn on_intervals_evaluated(&mut self, count: usize) {
        self.interval_evaluations = self.interval_evaluations.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_short_circuit(&mut self) {
        self.short_circuits = self.short_circuits.saturating_add(1);
    }

    #[inline]
    pub fn set_solve_duration(&mut self, duration: Duration) {
        self.solve_duration = duration;
    }
}

impl std::fmt::Display for OptimizerStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Optimizer Statistics:")?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(f, "  Interval Evaluations: {}", self.interval_evaluations)?;
        writeln!(f, "  Short Circuits: {}", self.short_circuits)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}
