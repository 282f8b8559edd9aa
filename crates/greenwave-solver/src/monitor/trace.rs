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

//! # Trace Monitor
//!
//! Emits the optimizer's progress as `tracing` events: one `debug` event per
//! round with the candidate transition and where the fold stopped, plus a
//! `trace` event per stoplight interval. Nothing is printed unless a
//! subscriber is installed and the level is enabled, so the monitor can stay
//! attached in production runs.

use crate::{
    monitor::optimizer_monitor::{IterationEvent, OptimizerMonitor, SearchCommand},
    result::OptimizerOutcome,
};
use greenwave_model::route::Route;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceMonitor {
    rounds: u64,
}

impl TraceMonitor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rounds observed since the last `on_enter`.
    #[inline]
    pub fn rounds(&self) -> u64 {
        self.rounds
    }
}

impl OptimizerMonitor for TraceMonitor {
    fn name(&self) -> &str {
        "TraceMonitor"
    }

    fn on_enter(&mut self, route: &Route) {
        self.rounds = 0;
        debug!(
            speed_limit = route.speed_limit().value(),
            stoplights = route.num_stoplights(),
            "optimizer entered"
        );
    }

    fn on_iteration(&mut self, event: &IterationEvent<'_>) {
        self.rounds = self.rounds.saturating_add(1);
        for (i, interval) in event.intervals.iter().enumerate() {
            trace!(
                iteration = event.iteration,
                stoplight = i,
                lower = interval.lower(),
                upper = interval.upper(),
                "feasible interval"
            );
        }
        debug!(
            iteration = event.iteration,
            reference = event.reference.value(),
            candidate = event.candidate.value(),
            folded = %event.folded,
            blocked_by = ?event.blocked_by.map(|i| i.get()),
            "round finished"
        );
    }

    fn on_exit(&mut self, outcome: &OptimizerOutcome) {
        debug!(
            result = %outcome.result(),
            reason = %outcome.reason(),
            rounds = self.rounds,
            "optimizer exited"
        );
    }

    #[inline]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
