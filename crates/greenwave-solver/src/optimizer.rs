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

//! # Speed Optimizer
//!
//! Finds a single constant speed, no faster than the speed limit, at which a
//! vehicle reaches every stoplight of a route during a green phase.
//!
//! ## Algorithm
//!
//! The optimizer is a fixed-point iteration over speed intervals. Starting
//! from the speed limit, each round
//!
//! 1. asks every stoplight for the interval of speeds (no faster than the
//!    current candidate) that reach its targeted green window,
//! 2. folds those intervals in route order, starting from `[0, candidate]`;
//!    the first interval that does not overlap the running intersection
//!    short-circuits the fold to `[0, min(running.upper, interval.upper)]`,
//! 3. continues with the upper bound of the folded interval as the new
//!    candidate.
//!
//! The candidate never increases. The run stops as soon as every stoplight
//! accepts the candidate, when a monitor asks to stop, when the iteration cap
//! is reached (degraded result), or when the candidate drops below what can
//! be reported as 1 km/h (infeasible route).
//!
//! This is a greedy descent, not an exhaustive search: a converged speed is
//! valid for every stoplight but not necessarily the fastest valid one.

use crate::{
    config::OptimizerConfig,
    monitor::{
        no_op::NoOpMonitor,
        optimizer_monitor::{IterationEvent, OptimizerMonitor, SearchCommand},
    },
    result::OptimizerOutcome,
    stats::OptimizerStatistics,
};
use greenwave_model::{
    index::StoplightIndex,
    route::Route,
    stoplight::SpeedInterval,
    units::MetersPerSecond,
};
use tracing::{debug, info, instrument, warn};

/// The result of a single refinement round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Candidate speed for the next round.
    pub next: MetersPerSecond,
    /// The folded interval the candidate was taken from.
    pub folded: SpeedInterval,
    /// Stoplight at which the fold short-circuited, if it did.
    pub blocked_by: Option<StoplightIndex>,
}

/// Folds `intervals` in order into `seed`.
///
/// Returns the folded interval and, if some interval did not overlap the
/// running intersection, the index of that interval. Intervals after it are
/// not looked at.
///
/// # Examples
///
/// ```rust
/// # use greenwave_solver::optimizer::fold_intervals;
/// # use greenwave_model::stoplight::SpeedInterval;
///
/// let seed = SpeedInterval::new(0.0, 10.0);
/// let (folded, blocked) = fold_intervals(
///     seed,
///     &[SpeedInterval::new(2.0, 8.0), SpeedInterval::new(4.0, 12.0)],
/// );
/// assert_eq!(folded, SpeedInterval::new(4.0, 8.0));
/// assert_eq!(blocked, None);
/// ```
pub fn fold_intervals(
    seed: SpeedInterval,
    intervals: &[SpeedInterval],
) -> (SpeedInterval, Option<StoplightIndex>) {
    let mut best = seed;
    for (i, interval) in intervals.iter().enumerate() {
        let next = best.intersect(*interval);
        if next.upper() != 0.0 {
            best = next;
            continue;
        }

        let upper = best.upper().min(interval.upper());
        return (
            SpeedInterval::new(0.0, upper),
            Some(StoplightIndex::new(i)),
        );
    }
    (best, None)
}

/// Fixed-point interval-intersection optimizer.
///
/// The optimizer owns a scratch buffer for the per-stoplight intervals, so
/// reusing one instance across routes avoids reallocating every round.
#[derive(Debug, Clone, Default)]
pub struct SpeedOptimizer {
    config: OptimizerConfig,
    intervals: Vec<SpeedInterval>,
}

impl SpeedOptimizer {
    /// Creates a new optimizer with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new optimizer with the given configuration.
    #[inline]
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self {
            config,
            intervals: Vec::new(),
        }
    }

    /// Returns the configuration used by `optimize`.
    #[inline]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Feasible intervals computed by the most recent round, in route order.
    #[inline]
    pub fn last_intervals(&self) -> &[SpeedInterval] {
        &self.intervals
    }

    /// Performs one refinement round starting from `reference`.
    ///
    /// `reference` must be strictly positive.
    pub fn step(&mut self, route: &Route, reference: MetersPerSecond) -> StepReport {
        let precision = self.config.precision;

        self.intervals.clear();
        self.intervals.extend(
            route
                .stoplights()
                .iter()
                .map(|s| s.feasible_speed_interval(reference, precision)),
        );

        let seed = SpeedInterval::new(0.0, reference.value());
        let (folded, blocked_by) = fold_intervals(seed, &self.intervals);

        StepReport {
            next: MetersPerSecond::new(folded.upper()),
            folded,
            blocked_by,
        }
    }

    /// Optimizes `route` without a monitor.
    #[inline]
    pub fn optimize(&mut self, route: &Route) -> OptimizerOutcome {
        self.optimize_with_monitor(route, &mut NoOpMonitor::new())
    }

    /// Optimizes `route`, reporting every round to `monitor`.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            stoplights = route.num_stoplights(),
            speed_limit = route.speed_limit().value(),
            max_iterations = self.config.max_iterations
        )
    )]
    pub fn optimize_with_monitor<M>(&mut self, route: &Route, monitor: &mut M) -> OptimizerOutcome
    where
        M: OptimizerMonitor + ?Sized,
    {
        let start = std::time::Instant::now();
        monitor.on_enter(route);

        let mut outcome = self.run(route, monitor);

        outcome.statistics_mut().set_solve_duration(start.elapsed());
        monitor.on_exit(&outcome);

        if outcome.is_converged() {
            info!(
                speed = ?outcome.speed().map(|s| s.value()),
                iterations = outcome.statistics().iterations,
                "optimizer converged"
            );
        } else {
            warn!(
                result = %outcome.result(),
                reason = %outcome.reason(),
                iterations = outcome.statistics().iterations,
                "optimizer did not converge"
            );
        }
        outcome
    }

    fn run<M>(&mut self, route: &Route, monitor: &mut M) -> OptimizerOutcome
    where
        M: OptimizerMonitor + ?Sized,
    {
        let precision = self.config.precision;
        let max_iterations = self.config.max_iterations;
        let mut stats = OptimizerStatistics::default();
        let mut candidate = route.speed_limit();

        // Stoplights never accept a speed that is reported as 0 km/h, and
        // candidates never increase, so no later round can recover.
        if !candidate.quantized(precision).is_positive() {
            return OptimizerOutcome::infeasible(stats);
        }

        loop {
            if route.all_pass(candidate, precision) {
                return OptimizerOutcome::converged(candidate, stats);
            }

            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                debug!(%reason, "monitor requested termination");
                return OptimizerOutcome::aborted(candidate, reason, stats);
            }

            if stats.iterations >= max_iterations {
                return OptimizerOutcome::iteration_limit(candidate, max_iterations, stats);
            }

            stats.on_iteration();
            let report = self.step(route, candidate);
            stats.on_intervals_evaluated(self.intervals.len());
            if report.blocked_by.is_some() {
                stats.on_short_circuit();
            }

            debug_assert!(
                report.next.value() <= candidate.value(),
                "candidate speed increased from {} to {}",
                candidate,
                report.next
            );

            monitor.on_iteration(&IterationEvent {
                iteration: stats.iterations,
                reference: candidate,
                candidate: report.next,
                folded: report.folded,
                blocked_by: report.blocked_by,
                intervals: &self.intervals,
            });

            candidate = report.next;
            if !candidate.quantized(precision).is_positive() {
                return OptimizerOutcome::infeasible(stats);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::OptimizerConfigBuilder,
        monitor::{
            composite::CompositeMonitor, time_limit::TimeLimitMonitor,
            trajectory::TrajectoryMonitor,
        },
        result::{OptimizerResult, TerminationReason},
    };
    use greenwave_core::num::precision::Precision;
    use greenwave_model::{
        route::RouteBuilder,
        units::{KilometersPerHour, Meters, Seconds},
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn route(limit_kmh: f64, stoplights: &[(f64, f64)]) -> Route {
        let mut b = RouteBuilder::new(KilometersPerHour::new(limit_kmh));
        b.add_stoplights(
            stoplights
                .iter()
                .map(|&(d, t)| (Meters::new(d), Seconds::new(t))),
        );
        b.build().expect("valid route")
    }

    fn reported(outcome: &OptimizerOutcome) -> Option<f64> {
        outcome
            .reported_speed(Precision::default())
            .map(|k| k.value())
    }

    fn iv(lower: f64, upper: f64) -> SpeedInterval {
        SpeedInterval::new(lower, upper)
    }

    #[test]
    fn test_fold_short_circuits_at_first_disjoint_interval() {
        let (folded, blocked) = fold_intervals(
            iv(0.0, 10.0),
            &[iv(2.0, 8.0), iv(9.0, 12.0), iv(1.0, 5.0)],
        );
        assert_eq!(folded, iv(0.0, 8.0));
        assert_eq!(blocked, Some(StoplightIndex::new(1)));
    }

    #[test]
    fn test_fold_short_circuit_takes_smaller_upper() {
        let (folded, blocked) = fold_intervals(iv(0.0, 10.0), &[iv(6.0, 8.0), iv(1.0, 3.0)]);
        assert_eq!(folded, iv(0.0, 3.0));
        assert_eq!(blocked, Some(StoplightIndex::new(1)));
    }

    #[test]
    fn test_fold_without_intervals_returns_seed() {
        assert_eq!(fold_intervals(iv(0.0, 7.0), &[]), (iv(0.0, 7.0), None));
    }

    #[test]
    fn test_fold_touching_intervals_do_not_overlap() {
        let (folded, blocked) = fold_intervals(iv(0.0, 10.0), &[iv(0.0, 4.0), iv(4.0, 6.0)]);
        assert_eq!(folded, iv(0.0, 4.0));
        assert_eq!(blocked, Some(StoplightIndex::new(1)));
    }

    #[test]
    fn test_single_stoplight_slows_to_next_green() {
        // 10 m/s arrives at 10 s (red); 5 m/s arrives at 20 s (green)
        let r = route(36.0, &[(100.0, 10.0)]);
        let outcome = SpeedOptimizer::new().optimize(&r);

        assert!(outcome.is_converged());
        assert_eq!(outcome.speed(), Some(MetersPerSecond::new(5.0)));
        assert_eq!(reported(&outcome), Some(18.0));
        assert_eq!(outcome.statistics().iterations, 1);
        assert!(r.all_pass(MetersPerSecond::new(5.0), Precision::default()));
    }

    #[test]
    fn test_speed_limit_already_passes() {
        let r = route(50.0, &[(1000.0, 30.0)]);
        let outcome = SpeedOptimizer::new().optimize(&r);

        assert!(outcome.is_converged());
        assert_eq!(outcome.speed(), Some(r.speed_limit()));
        assert_eq!(reported(&outcome), Some(50.0));
        assert_eq!(outcome.statistics().iterations, 0);
    }

    #[test]
    fn test_empty_route_converges_at_limit() {
        let r = route(90.0, &[]);
        let outcome = SpeedOptimizer::new().optimize(&r);
        assert_eq!(outcome.result(), &OptimizerResult::Converged(r.speed_limit()));
        assert_eq!(reported(&outcome), Some(90.0));
    }

    #[test]
    fn test_known_routes() {
        let cases: [(f64, &[(f64, f64)], f64); 4] = [
            (50.0, &[(200.0, 10.0)], 36.0),
            (90.0, &[(300.0, 10.0), (1500.0, 10.0), (3000.0, 10.0)], 54.0),
            (80.0, &[(700.0, 25.0), (1200.0, 10.0)], 50.0),
            (130.0, &[(1000.0, 5.0), (2000.0, 7.0), (3000.0, 11.0)], 120.0),
        ];

        let mut optimizer = SpeedOptimizer::new();
        for (limit, stoplights, expected) in cases {
            let r = route(limit, stoplights);
            let outcome = optimizer.optimize(&r);
            assert!(outcome.is_converged(), "{limit} km/h: {outcome}");
            assert_eq!(reported(&outcome), Some(expected), "{limit} km/h");
            assert_eq!(outcome.statistics().iterations, 1, "{limit} km/h");
        }
    }

    #[test]
    fn test_step_reports_blocking_stoplight() {
        let r = route(80.0, &[(700.0, 25.0), (1200.0, 10.0)]);
        let mut optimizer = SpeedOptimizer::new();
        let report = optimizer.step(&r, r.speed_limit());

        assert_eq!(report.next, MetersPerSecond::new(14.0));
        assert_eq!(report.folded, iv(0.0, 14.0));
        assert_eq!(report.blocked_by, Some(StoplightIndex::new(1)));
        assert_eq!(optimizer.last_intervals().len(), 2);
    }

    #[test]
    fn test_step_is_idempotent_at_fixed_point() {
        let mut optimizer = SpeedOptimizer::new();
        let cases: [(f64, &[(f64, f64)], f64); 3] = [
            (36.0, &[(100.0, 10.0)], 5.0),
            (80.0, &[(700.0, 25.0), (1200.0, 10.0)], 14.0),
            (90.0, &[(300.0, 10.0), (1500.0, 10.0), (3000.0, 10.0)], 15.0),
        ];
        for (limit, stoplights, speed) in cases {
            let r = route(limit, stoplights);
            let speed = MetersPerSecond::new(speed);
            assert!(r.all_pass(speed, Precision::default()));
            assert_eq!(optimizer.step(&r, speed).next, speed);
        }
    }

    #[test]
    fn test_iteration_cap_yields_degraded_result() {
        let r = route(30.0, &[(2600.0, 45.0), (4900.0, 15.0), (1700.0, 20.0)]);
        let outcome = SpeedOptimizer::new().optimize(&r);

        assert!(outcome.is_degraded());
        assert_eq!(outcome.reason(), &TerminationReason::IterationLimit(50));
        assert_eq!(outcome.statistics().iterations, 50);
        assert_eq!(reported(&outcome), Some(8.0));
        let speed = outcome.speed().unwrap();
        assert!((speed.value() - 2.2843822843822843).abs() < 1e-9);
        assert!(!r.all_pass(speed, Precision::default()));
    }

    #[test]
    fn test_raised_cap_lets_slow_route_converge() {
        let r = route(30.0, &[(2600.0, 45.0), (4900.0, 15.0), (1700.0, 20.0)]);
        let config = OptimizerConfigBuilder::new().max_iterations(100).build();
        let outcome = SpeedOptimizer::with_config(config).optimize(&r);

        assert!(outcome.is_converged());
        assert_eq!(outcome.statistics().iterations, 74);
        assert_eq!(reported(&outcome), Some(4.0));
        let speed = outcome.speed().unwrap();
        assert!((speed.value() - 1.3756613756613756).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cap_returns_speed_limit_degraded() {
        let r = route(36.0, &[(100.0, 10.0)]);
        let config = OptimizerConfigBuilder::new().max_iterations(0).build();
        let outcome = SpeedOptimizer::with_config(config).optimize(&r);

        assert_eq!(outcome.result(), &OptimizerResult::Degraded(r.speed_limit()));
        assert_eq!(outcome.reason(), &TerminationReason::IterationLimit(0));
    }

    #[test]
    fn test_unreportable_speed_limit_is_infeasible() {
        // 0.5 km/h is reported as 0 km/h, which no stoplight accepts.
        let r = route(0.5, &[(0.0, 10.0)]);
        let outcome = SpeedOptimizer::new().optimize(&r);

        assert!(outcome.is_infeasible());
        assert_eq!(outcome.reason(), &TerminationReason::InfeasibleRoute);
        assert_eq!(outcome.speed(), None);
        assert_eq!(outcome.statistics().iterations, 0);
    }

    #[test]
    fn test_unreportable_speed_limit_without_stoplights_is_infeasible() {
        let outcome = SpeedOptimizer::new().optimize(&route(0.5, &[]));
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.statistics().iterations, 0);
    }

    #[test]
    fn test_candidate_below_one_kmh_is_infeasible() {
        // The first round drops just below 1 km/h, which is reported as
        // 0 km/h. No later round could converge.
        let r = route(1.0, &[(1465.0, 27.0), (1282.0, 50.0)]);
        let mut trajectory = TrajectoryMonitor::new();
        let outcome = SpeedOptimizer::new().optimize_with_monitor(&r, &mut trajectory);

        assert!(outcome.is_infeasible());
        assert_eq!(outcome.reason(), &TerminationReason::InfeasibleRoute);
        assert_eq!(outcome.statistics().iterations, 1);
        assert_eq!(outcome.reported_speed(Precision::default()), None);

        let candidates = trajectory.candidates();
        assert_eq!(candidates.len(), 2);
        let one_kmh = KilometersPerHour::new(1.0).to_meters_per_second();
        assert!(candidates[1].value() < one_kmh.value());
    }

    #[test]
    fn test_time_limit_aborts_with_candidate() {
        let r = route(36.0, &[(100.0, 10.0)]);
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO);
        let outcome = SpeedOptimizer::new().optimize_with_monitor(&r, &mut monitor);

        assert_eq!(outcome.result(), &OptimizerResult::Degraded(r.speed_limit()));
        assert_eq!(
            outcome.reason(),
            &TerminationReason::Aborted("time limit reached".to_string())
        );
        assert_eq!(outcome.statistics().iterations, 0);
    }

    #[test]
    fn test_monitor_is_not_consulted_once_converged() {
        let r = route(50.0, &[(1000.0, 30.0)]);
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO);
        let outcome = SpeedOptimizer::new().optimize_with_monitor(&r, &mut monitor);
        assert!(outcome.is_converged());
    }

    #[test]
    fn test_trajectory_through_composite() {
        let r = route(30.0, &[(2600.0, 45.0), (4900.0, 15.0), (1700.0, 20.0)]);
        let mut trajectory = TrajectoryMonitor::new();
        {
            let mut composite = CompositeMonitor::new();
            composite.add_monitor(&mut trajectory);
            SpeedOptimizer::new().optimize_with_monitor(&r, &mut composite);
        }

        let candidates = trajectory.candidates();
        assert_eq!(candidates.len(), 51);
        assert_eq!(candidates[0], r.speed_limit());
        assert!((candidates[1].value() - 8.166666666666666).abs() < 1e-9);
        assert!(trajectory.is_non_increasing());
    }

    #[test]
    fn test_random_routes_terminate_monotonically() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x6772_6565_6e77_6176);
        let mut optimizer = SpeedOptimizer::new();

        for _ in 0..500 {
            let limit = f64::from(rng.random_range(10u32..=130));
            let n: usize = rng.random_range(0..=8);
            let stoplights: Vec<(f64, f64)> = (0..n)
                .map(|_| {
                    (
                        f64::from(rng.random_range(1u32..=5000)),
                        f64::from(rng.random_range(1u32..=60)),
                    )
                })
                .collect();
            let r = route(limit, &stoplights);

            let mut trajectory = TrajectoryMonitor::new();
            let outcome = optimizer.optimize_with_monitor(&r, &mut trajectory);

            assert!(outcome.statistics().iterations <= 50);
            assert!(trajectory.is_non_increasing(), "{:?}", trajectory.candidates());
            if let Some(speed) = outcome.speed() {
                assert!(speed.value().is_finite());
                assert!(speed.to_reported_kilometers_per_hour(Precision::default()).value() >= 1.0);
                assert!(speed.value() >= 0.0);
                assert!(speed.value() <= r.speed_limit().value());
            }
            if outcome.is_converged() {
                assert!(r.all_pass(outcome.speed().unwrap(), Precision::default()));
            }
        }
    }
}
