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
use greenwave_model::{loading::RouteLoader, route::Route};
use greenwave_solver::{
    config::OptimizerConfig, monitor::trace::TraceMonitor, optimizer::SpeedOptimizer,
    result::OptimizerOutcome,
};
use std::{io, process::ExitCode};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_route(path: Option<&str>) -> Result<Route, Box<dyn std::error::Error>> {
    let loader = RouteLoader::new();
    let route = match path {
        Some(p) => {
            info!(path = p, "loading route from file");
            loader.from_path(p)?
        }
        None => loader.from_bufread(io::stdin().lock())?,
    };
    Ok(route)
}

/// What the binary prints for a finished run.
#[derive(Debug, Clone, PartialEq)]
enum Report {
    /// A speed in whole km/h. `best_effort` is set when the run was cut off
    /// and the speed may still hit a red light.
    Speed { kmh: f64, best_effort: bool },
    /// No speed exists; carries the termination reason.
    NoSpeed(String),
}

fn summarize(outcome: &OptimizerOutcome, precision: Precision) -> Report {
    match outcome.reported_speed(precision) {
        Some(speed) => Report::Speed {
            kmh: speed.value(),
            best_effort: outcome.is_degraded(),
        },
        None => Report::NoSpeed(outcome.reason().to_string()),
    }
}

fn report(outcome: &OptimizerOutcome, config: &OptimizerConfig) -> ExitCode {
    info!(statistics = %outcome.statistics(), "optimizer finished");

    match summarize(outcome, config.precision) {
        Report::Speed { kmh, best_effort } => {
            if best_effort {
                warn!(
                    reason = %outcome.reason(),
                    "reported speed is a best effort and may hit a red light"
                );
            }
            println!("{}", kmh);
            ExitCode::SUCCESS
        }
        Report::NoSpeed(reason) => {
            error!(%reason, "no speed passes every stoplight");
            eprintln!("error: {}", reason);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    enable_tracing();

    let path = std::env::args().nth(1);
    let route = match load_route(path.as_deref()) {
        Ok(route) => route,
        Err(e) => {
            error!(error = %e, "failed to load route");
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = OptimizerConfig::default();
    let mut optimizer = SpeedOptimizer::with_config(config);
    let outcome = optimizer.optimize_with_monitor(&route, &mut TraceMonitor::new());
    report(&outcome, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenwave_model::units::MetersPerSecond;
    use greenwave_solver::stats::OptimizerStatistics;

    fn solve(input: &str) -> OptimizerOutcome {
        let route = RouteLoader::new().from_str(input).expect("valid input");
        SpeedOptimizer::new().optimize(&route)
    }

    #[test]
    fn test_converged_speed_is_printed() {
        let outcome = solve("36\n1\n100 10\n");
        assert_eq!(
            summarize(&outcome, Precision::default()),
            Report::Speed {
                kmh: 18.0,
                best_effort: false
            }
        );
    }

    #[test]
    fn test_iteration_limit_is_printed_as_best_effort() {
        let outcome = solve("30\n3\n2600 45\n4900 15\n1700 20\n");
        assert_eq!(
            summarize(&outcome, Precision::default()),
            Report::Speed {
                kmh: 8.0,
                best_effort: true
            }
        );
    }

    #[test]
    fn test_infeasible_route_prints_no_speed() {
        let outcome = solve("1\n2\n1465 27\n1282 50\n");
        assert_eq!(
            summarize(&outcome, Precision::default()),
            Report::NoSpeed("Infeasible route".to_string())
        );
    }

    #[test]
    fn test_aborted_run_is_best_effort() {
        let outcome = OptimizerOutcome::aborted(
            MetersPerSecond::new(10.0),
            "time limit reached",
            OptimizerStatistics::default(),
        );
        assert_eq!(
            summarize(&outcome, Precision::default()),
            Report::Speed {
                kmh: 36.0,
                best_effort: true
            }
        );
    }
}
