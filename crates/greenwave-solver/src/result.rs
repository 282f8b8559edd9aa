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

//! Optimizer outcome and termination reporting.
//!
//! A run always ends in one of three states: every stoplight accepts the
//! final speed (`Converged`), the run stopped early and the speed is only a
//! best effort that may still hit a red light (`Degraded`), or the candidate
//! speed collapsed to zero and no route speed exists (`Infeasible`). The
//! `TerminationReason` says why the run stopped, so callers and tests can
//! tell a converged answer apart from one cut off by the iteration cap.

use crate::stats::OptimizerStatistics;
use greenwave_core::num::precision::Precision;
use greenwave_model::units::{KilometersPerHour, MetersPerSecond};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptimizerResult {
    /// Every stoplight lets the vehicle pass at this speed.
    Converged(MetersPerSecond),
    /// The last candidate before the run was cut off. Not guaranteed to pass
    /// every stoplight.
    Degraded(MetersPerSecond),
    /// The candidate speed dropped to zero; the route cannot be driven.
    Infeasible,
}

impl std::fmt::Display for OptimizerResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizerResult::Converged(speed) => write!(f, "Converged(speed={})", speed),
            OptimizerResult::Degraded(speed) => write!(f, "Degraded(speed={})", speed),
            OptimizerResult::Infeasible => write!(f, "Infeasible"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// All stoplights accept the current candidate.
    Converged,
    /// The configured number of rounds was used up.
    IterationLimit(u64),
    /// The candidate speed reached zero.
    InfeasibleRoute,
    /// A monitor requested termination; the string carries its reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Converged => write!(f, "Converged"),
            TerminationReason::IterationLimit(limit) => {
                write!(f, "Iteration limit of {} reached", limit)
            }
            TerminationReason::InfeasibleRoute => write!(f, "Infeasible route"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of an optimizer run together with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerOutcome {
    result: OptimizerResult,
    reason: TerminationReason,
    statistics: OptimizerStatistics,
}

impl OptimizerOutcome {
    #[inline]
    pub fn converged(speed: MetersPerSecond, statistics: OptimizerStatistics) -> Self {
        Self {
            result: OptimizerResult::Converged(speed),
            reason: TerminationReason::Converged,
            statistics,
        }
    }

    #[inline]
    pub fn iteration_limit(
        speed: MetersPerSecond,
        limit: u64,
        statistics: OptimizerStatistics,
    ) -> Self {
        Self {
            result: OptimizerResult::Degraded(speed),
            reason: TerminationReason::IterationLimit(limit),
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(speed: MetersPerSecond, reason: R, statistics: OptimizerStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: OptimizerResult::Degraded(speed),
            reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: OptimizerStatistics) -> Self {
        Self {
            result: OptimizerResult::Infeasible,
            reason: TerminationReason::InfeasibleRoute,
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &OptimizerResult {
        &self.result
    }

    #[inline]
    pub fn reason(&self) -> &TerminationReason {
        &self.reason
    }

    #[inline]
    pub fn statistics(&self) -> &OptimizerStatistics {
        &self.statistics
    }

    #[inline]
    pub(crate) fn statistics_mut(&mut self) -> &mut OptimizerStatistics {
        &mut self.statistics
    }

    /// The final speed, if the run produced one.
    #[inline]
    pub fn speed(&self) -> Option<MetersPerSecond> {
        match self.result {
            OptimizerResult::Converged(s) | OptimizerResult::Degraded(s) => Some(s),
            OptimizerResult::Infeasible => None,
        }
    }

    /// The final speed as it is reported: whole km/h, floored.
    #[inline]
    pub fn reported_speed(&self, precision: Precision) -> Option<KilometersPerHour> {
        self.speed()
            .map(|s| s.to_reported_kilometers_per_hour(precision))
    }

    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(self.result, OptimizerResult::Converged(_))
    }

    #[inline]
    pub fn is_degraded(&self) -> bool {
        matches!(self.result, OptimizerResult::Degraded(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, OptimizerResult::Infeasible)
    }
}

impl std::fmt::Display for OptimizerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {} iterations)",
            self.result, self.reason, self.statistics.iterations
        )
    }
}
