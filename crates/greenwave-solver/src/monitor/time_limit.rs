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

//! # Time Limit Monitor
//!
//! Enforces a wall-clock budget on an optimizer run. The clock starts in
//! `on_enter`; once the budget is used up `search_command()` returns
//! `Terminate("time limit reached")` and the optimizer stops with its current
//! candidate as a degraded result.
//!
//! Rounds are cheap but not free (every stoplight is evaluated each round),
//! so unlike a per-node search budget the clock is read on every check.
//!
//! ## Usage
//!
//! ```rust
//! use greenwave_solver::monitor::time_limit::TimeLimitMonitor;
//! use greenwave_solver::monitor::optimizer_monitor::{OptimizerMonitor, SearchCommand};
//! use std::time::Duration;
//!
//! let mon = TimeLimitMonitor::new(Duration::from_secs(5));
//! assert_eq!(mon.search_command(), SearchCommand::Continue);
//! ```

use crate::{
    monitor::optimizer_monitor::{IterationEvent, OptimizerMonitor, SearchCommand},
    result::OptimizerOutcome,
};
use greenwave_model::route::Route;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    time_limit: Duration,
    start_time: Instant,
}

impl TimeLimitMonitor {
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl OptimizerMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter(&mut self, _route: &Route) {
        self.start_time = Instant::now();
    }

    fn on_iteration(&mut self, _event: &IterationEvent<'_>) {}

    fn on_exit(&mut self, _outcome: &OptimizerOutcome) {}

    #[inline]
    fn search_command(&self) -> SearchCommand {
        if self.start_time.elapsed() >= self.time_limit {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}
