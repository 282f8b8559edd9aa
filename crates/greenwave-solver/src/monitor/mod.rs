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

//! # Optimizer Monitors
//!
//! Pluggable observers and controllers for the optimizer loop. Monitors see
//! every refinement round, can record or log it, and can ask the optimizer to
//! stop early with its current best-effort speed.
//!
//! ## Submodules
//!
//! - `optimizer_monitor`: Core trait (`OptimizerMonitor`), the per-round
//!   `IterationEvent`, and the `SearchCommand` enum.
//! - `composite`: Fan a single hook out to several monitors.
//! - `no_op`: A monitor that does nothing; the default for `optimize`.
//! - `trace`: Emits each round as `tracing` events.
//! - `trajectory`: Records the candidate speed of every round.
//! - `time_limit`: Wall-clock budget for a run.

pub mod composite;
pub mod no_op;
pub mod optimizer_monitor;
pub mod time_limit;
pub mod trace;
pub mod trajectory;
