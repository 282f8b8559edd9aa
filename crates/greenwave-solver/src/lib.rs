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

//! # Greenwave Solver
//!
//! The fixed-point interval-intersection optimizer for the green-wave speed
//! problem, together with its configuration, outcome reporting, and monitors.
//!
//! ## Modules
//!
//! - `optimizer`: `SpeedOptimizer`, the refinement loop and its single
//!   `step`, plus the short-circuiting `fold_intervals`.
//! - `config`: `OptimizerConfig` and its builder (iteration cap, precision).
//! - `result`: `OptimizerOutcome`, telling a converged speed apart from a
//!   degraded best effort and an infeasible route.
//! - `stats`: Counters and timing collected during a run.
//! - `monitor`: Hooks into every round for tracing, recording, and limits.
//!
//! ## Example
//!
//! ```rust
//! use greenwave_core::num::precision::Precision;
//! use greenwave_model::loading::RouteLoader;
//! use greenwave_solver::optimizer::SpeedOptimizer;
//!
//! let route = RouteLoader::new().from_str("36\n1\n100 10\n").unwrap();
//! let outcome = SpeedOptimizer::new().optimize(&route);
//! assert!(outcome.is_converged());
//! assert_eq!(outcome.reported_speed(Precision::default()).unwrap().value(), 18.0);
//! ```

pub mod config;
pub mod monitor;
pub mod optimizer;
pub mod result;
pub mod stats;
