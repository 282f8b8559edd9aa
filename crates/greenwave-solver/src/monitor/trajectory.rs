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

use crate::{
    monitor::optimizer_monitor::{IterationEvent, OptimizerMonitor, SearchCommand},
    result::OptimizerOutcome,
};
use greenwave_model::{route::Route, units::MetersPerSecond};

/// Records the candidate speed of every round.
///
/// The first entry is the speed limit the run starts from; each round then
/// appends the candidate it produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrajectoryMonitor {
    candidates: Vec<MetersPerSecond>,
}

impl TrajectoryMonitor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn candidates(&self) -> &[MetersPerSecond] {
        &self.candidates
    }

    /// Returns `true` if no round ever raised the candidate speed.
    pub fn is_non_increasing(&self) -> bool {
        self.candidates
            .windows(2)
            .all(|w| w[1].value() <= w[0].value())
    }
}

impl OptimizerMonitor for TrajectoryMonitor {
    fn name(&self) -> &str {
        "TrajectoryMonitor"
    }

    fn on_enter(&mut self, route: &Route) {
        self.candidates.clear();
        self.candidates.push(route.speed_limit());
    }

    fn on_iteration(&mut self, event: &IterationEvent<'_>) {
        self.candidates.push(event.candidate);
    }

    fn on_exit(&mut self, _outcome: &OptimizerOutcome) {}

    #[inline]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trajectory(values: &[f64]) -> TrajectoryMonitor {
        TrajectoryMonitor {
            candidates: values.iter().copied().map(MetersPerSecond::new).collect(),
        }
    }

    #[test]
    fn test_non_increasing() {
        assert!(trajectory(&[]).is_non_increasing());
        assert!(trajectory(&[10.0]).is_non_increasing());
        assert!(trajectory(&[10.0, 8.0, 8.0, 5.0]).is_non_increasing());
        assert!(!trajectory(&[10.0, 8.0, 9.0]).is_non_increasing());
    }
}
