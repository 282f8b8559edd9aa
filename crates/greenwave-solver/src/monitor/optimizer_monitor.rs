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

use crate::result::OptimizerOutcome;
use greenwave_model::{
    index::StoplightIndex,
    route::Route,
    stoplight::SpeedInterval,
    units::MetersPerSecond,
};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Everything that happened in one refinement round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationEvent<'a> {
    /// One-based round number.
    pub iteration: u64,
    /// Candidate the round started from.
    pub reference: MetersPerSecond,
    /// Candidate the round produced.
    pub candidate: MetersPerSecond,
    /// Result of folding the per-stoplight intervals.
    pub folded: SpeedInterval,
    /// Stoplight at which the fold short-circuited, if it did.
    pub blocked_by: Option<StoplightIndex>,
    /// Feasible interval of every stoplight, in route order.
    pub intervals: &'a [SpeedInterval],
}

impl std::fmt::Display for IterationEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Iteration {}: {} -> {} (folded: {}",
            self.iteration, self.reference, self.candidate, self.folded
        )?;
        if let Some(index) = self.blocked_by {
            write!(f, ", blocked by: {}", index)?;
        }
        write!(f, ")")
    }
}

pub trait OptimizerMonitor {
    fn name(&self) -> &str;
    fn on_enter(&mut self, route: &Route);
    fn on_iteration(&mut self, event: &IterationEvent<'_>);
    fn on_exit(&mut self, outcome: &OptimizerOutcome);
    fn search_command(&self) -> SearchCommand;
}

// Lets a caller lend a monitor to a composite and inspect it afterwards.
impl<M> OptimizerMonitor for &mut M
where
    M: OptimizerMonitor + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn on_enter(&mut self, route: &Route) {
        (**self).on_enter(route)
    }

    #[inline]
    fn on_iteration(&mut self, event: &IterationEvent<'_>) {
        (**self).on_iteration(event)
    }

    #[inline]
    fn on_exit(&mut self, outcome: &OptimizerOutcome) {
        (**self).on_exit(outcome)
    }

    #[inline]
    fn search_command(&self) -> SearchCommand {
        (**self).search_command()
    }
}

impl std::fmt::Debug for dyn OptimizerMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OptimizerMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn OptimizerMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OptimizerMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_command_display() {
        assert_eq!(SearchCommand::Continue.to_string(), "Continue");
        assert_eq!(
            SearchCommand::Terminate("done".into()).to_string(),
            "Terminate: done"
        );
        assert_eq!(SearchCommand::default(), SearchCommand::Continue);
    }

    #[test]
    fn test_iteration_event_display() {
        let intervals = [SpeedInterval::new(2.0, 8.0)];
        let event = IterationEvent {
            iteration: 3,
            reference: MetersPerSecond::new(10.0),
            candidate: MetersPerSecond::new(8.0),
            folded: SpeedInterval::new(0.0, 8.0),
            blocked_by: Some(StoplightIndex::new(1)),
            intervals: &intervals,
        };
        assert_eq!(
            event.to_string(),
            "Iteration 3: 10 m/s -> 8 m/s (folded: [0, 8], blocked by: StoplightIndex(1))"
        );
    }
}
