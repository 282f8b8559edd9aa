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

//! # Greenwave Model
//!
//! **The domain model for the green-wave speed problem.**
//!
//! A vehicle drives a route at one constant speed, never faster than the
//! speed limit, and must reach every stoplight while it is green. This crate
//! describes that problem; solving it is left to `greenwave_solver`.
//!
//! ## Architecture
//!
//! * **`units`**: Newtypes for meters, seconds, m/s and km/h with the two
//!   conversions the problem needs (limit in, reported speed out).
//! * **`stoplight`**: A single stoplight, its phase at a given arrival, and
//!   the interval of speeds that reach its targeted green window.
//! * **`route`**: The immutable `Route` and its validating `RouteBuilder`.
//! * **`index`**: `StoplightIndex`, the position of a stoplight on the route.
//! * **`loading`**: `RouteLoader`, parsing the line protocol into a `Route`.
//!
//! ## Design Philosophy
//!
//! 1.  **Units are types**: A speed in km/h cannot be passed where m/s is
//!     expected; every conversion goes through one documented function.
//! 2.  **Fail-Fast**: Builders and constructors validate inputs eagerly so
//!     the optimizer never divides by a zero duration or a zero speed limit.

pub mod index;
pub mod loading;
pub mod route;
pub mod stoplight;
pub mod units;
