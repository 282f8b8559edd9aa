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

//! The route a vehicle drives: a speed limit and an ordered list of stoplights.
//!
//! A `Route` is immutable and always valid; it can only be obtained through
//! `RouteBuilder::build`, which rejects non-positive speed limits and
//! malformed stoplights with a `RouteError` naming the offending input.

use crate::{
    index::StoplightIndex,
    stoplight::{Stoplight, StoplightError},
    units::{KilometersPerHour, Meters, MetersPerSecond, Seconds},
};
use greenwave_core::num::precision::Precision;

/// The error type for route construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteError {
    /// The speed limit is not strictly positive (or not finite).
    InvalidSpeedLimit(KilometersPerHour),
    /// A stoplight has a negative or non-finite distance.
    InvalidDistance { index: StoplightIndex, distance: f64 },
    /// A stoplight has a non-positive or non-finite half-cycle duration.
    InvalidDuration { index: StoplightIndex, duration: f64 },
}

impl RouteError {
    fn from_stoplight(index: StoplightIndex, e: StoplightError) -> Self {
        match e {
            StoplightError::InvalidDistance(distance) => Self::InvalidDistance { index, distance },
            StoplightError::InvalidDuration(duration) => Self::InvalidDuration { index, duration },
        }
    }
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSpeedLimit(limit) => {
                write!(f, "Speed limit must be positive, got {limit}")
            }
            Self::InvalidDistance { index, distance } => write!(
                f,
                "Stoplight {} has invalid distance {} (must be finite and non-negative)",
                index.get(),
                distance
            ),
            Self::InvalidDuration { index, duration } => write!(
                f,
                "Stoplight {} has invalid duration {} (must be finite and positive)",
                index.get(),
                duration
            ),
        }
    }
}

impl std::error::Error for RouteError {}

/// A validated route.
#[derive(Clone, PartialEq)]
pub struct Route {
    speed_limit: MetersPerSecond,
    stoplights: Vec<Stoplight>,
}

impl Route {
    /// The speed limit in meters per second.
    #[inline]
    pub fn speed_limit(&self) -> MetersPerSecond {
        self.speed_limit
    }

    /// All stoplights in route order.
    #[inline]
    pub fn stoplights(&self) -> &[Stoplight] {
        &self.stoplights
    }

    #[inline]
    pub fn num_stoplights(&self) -> usize {
        self.stoplights.len()
    }

    /// Returns the stoplight at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_stoplights()`.
    #[inline]
    pub fn stoplight(&self, index: StoplightIndex) -> &Stoplight {
        let i = index.get();
        assert!(
            i < self.stoplights.len(),
            "called `Route::stoplight` with stoplight index out of bounds: the len is {} but the index is {}",
            self.stoplights.len(),
            i
        );
        &self.stoplights[i]
    }

    /// Iterates over the stoplights together with their indices.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (StoplightIndex, &Stoplight)> + '_ {
        self.stoplights
            .iter()
            .enumerate()
            .map(|(i, s)| (StoplightIndex::new(i), s))
    }

    /// Returns `true` if every stoplight lets the vehicle pass at `speed`.
    ///
    /// A route without stoplights is passable at any speed.
    #[inline]
    pub fn all_pass(&self, speed: MetersPerSecond, precision: Precision) -> bool {
        self.stoplights.iter().all(|s| s.can_pass(speed, precision))
    }

    /// Indices of the stoplights that would stop the vehicle at `speed`.
    pub fn blocking(&self, speed: MetersPerSecond, precision: Precision) -> Vec<StoplightIndex> {
        self.iter()
            .filter(|(_, s)| !s.can_pass(speed, precision))
            .map(|(i, _)| i)
            .collect()
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("speed_limit", &self.speed_limit)
            .field("stoplights", &self.stoplights)
            .finish()
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Route(speed_limit: {}, num_stoplights: {})",
            self.speed_limit,
            self.num_stoplights()
        )
    }
}

/// Builder for [`Route`].
///
/// # Examples
///
/// ```rust
/// # use greenwave_model::route::RouteBuilder;
/// # use greenwave_model::units::{KilometersPerHour, Meters, Seconds};
///
/// let mut builder = RouteBuilder::new(KilometersPerHour::new(50.0));
/// builder
///     .add_stoplight(Meters::new(200.0), Seconds::new(10.0))
///     .add_stoplight(Meters::new(1000.0), Seconds::new(30.0));
/// let route = builder.build().expect("valid route");
/// assert_eq!(route.num_stoplights(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct RouteBuilder {
    speed_limit: KilometersPerHour,
    stoplights: Vec<(Meters, Seconds)>,
}

impl RouteBuilder {
    /// Creates a new builder for a route with the given speed limit.
    #[inline]
    pub fn new(speed_limit: KilometersPerHour) -> Self {
        Self {
            speed_limit,
            stoplights: Vec::new(),
        }
    }

    /// Creates a new builder with room for `capacity` stoplights.
    #[inline]
    pub fn with_capacity(speed_limit: KilometersPerHour, capacity: usize) -> Self {
        Self {
            speed_limit,
            stoplights: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn num_stoplights(&self) -> usize {
        self.stoplights.len()
    }

    /// Appends a stoplight. Order of insertion is route order.
    #[inline]
    pub fn add_stoplight(&mut self, distance: Meters, duration: Seconds) -> &mut Self {
        self.stoplights.push((distance, duration));
        self
    }

    /// Appends several stoplights in order.
    pub fn add_stoplights<I>(&mut self, stoplights: I) -> &mut Self
    where
        I: IntoIterator<Item = (Meters, Seconds)>,
    {
        self.stoplights.extend(stoplights);
        self
    }

    /// Validates the input and builds the route.
    pub fn build(self) -> Result<Route, RouteError> {
        let limit = self.speed_limit.to_meters_per_second();
        if !self.speed_limit.is_positive() || !limit.is_positive() {
            return Err(RouteError::InvalidSpeedLimit(self.speed_limit));
        }

        let stoplights = self
            .stoplights
            .into_iter()
            .enumerate()
            .map(|(i, (distance, duration))| {
                Stoplight::try_new(distance, duration)
                    .map_err(|e| RouteError::from_stoplight(StoplightIndex::new(i), e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Route {
            speed_limit: limit,
            stoplights,
        })
    }
}

impl std::fmt::Display for RouteBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RouteBuilder(speed_limit: {}, num_stoplights: {})",
            self.speed_limit,
            self.num_stoplights()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kmh(v: f64) -> KilometersPerHour {
        KilometersPerHour::new(v)
    }

    fn sl(d: f64, t: f64) -> (Meters, Seconds) {
        (Meters::new(d), Seconds::new(t))
    }

    #[test]
    fn test_build_converts_speed_limit() {
        let route = RouteBuilder::new(kmh(36.0)).build().unwrap();
        assert_eq!(route.speed_limit().value(), 10.0);
        assert_eq!(route.num_stoplights(), 0);
    }

    #[test]
    fn test_build_keeps_order() {
        let mut b = RouteBuilder::with_capacity(kmh(50.0), 3);
        b.add_stoplights([sl(300.0, 10.0), sl(100.0, 5.0)])
            .add_stoplight(Meters::new(900.0), Seconds::new(30.0));
        let route = b.build().unwrap();

        let distances: Vec<f64> = route
            .stoplights()
            .iter()
            .map(|s| s.distance().value())
            .collect();
        assert_eq!(distances, vec![300.0, 100.0, 900.0]);
        assert_eq!(
            route.stoplight(StoplightIndex::new(2)).duration().value(),
            30.0
        );
    }

    #[test]
    fn test_build_rejects_non_positive_limit() {
        assert_eq!(
            RouteBuilder::new(kmh(0.0)).build(),
            Err(RouteError::InvalidSpeedLimit(kmh(0.0)))
        );
        assert!(matches!(
            RouteBuilder::new(kmh(-20.0)).build(),
            Err(RouteError::InvalidSpeedLimit(_))
        ));
        assert!(matches!(
            RouteBuilder::new(kmh(f64::INFINITY)).build(),
            Err(RouteError::InvalidSpeedLimit(_))
        ));
    }

    #[test]
    fn test_build_reports_offending_stoplight() {
        let mut b = RouteBuilder::new(kmh(50.0));
        b.add_stoplights([sl(100.0, 10.0), sl(200.0, 0.0)]);
        assert_eq!(
            b.build(),
            Err(RouteError::InvalidDuration {
                index: StoplightIndex::new(1),
                duration: 0.0
            })
        );

        let mut b = RouteBuilder::new(kmh(50.0));
        b.add_stoplight(Meters::new(-5.0), Seconds::new(10.0));
        assert_eq!(
            b.build(),
            Err(RouteError::InvalidDistance {
                index: StoplightIndex::new(0),
                distance: -5.0
            })
        );
    }

    #[test]
    fn test_all_pass_and_blocking() {
        let p = Precision::default();
        let mut b = RouteBuilder::new(kmh(36.0));
        b.add_stoplights([sl(100.0, 10.0), sl(50.0, 10.0), sl(300.0, 10.0)]);
        let route = b.build().unwrap();

        // at 10 m/s: arrivals 10 s (red), 5 s (green), 30 s (red)
        let limit = route.speed_limit();
        assert!(!route.all_pass(limit, p));
        assert_eq!(
            route.blocking(limit, p),
            vec![StoplightIndex::new(0), StoplightIndex::new(2)]
        );

        // at 5 m/s: arrivals 20 s, 10 s (red), 60 s
        let slow = MetersPerSecond::new(5.0);
        assert_eq!(route.blocking(slow, p), vec![StoplightIndex::new(1)]);
    }

    #[test]
    fn test_empty_route_always_passes() {
        let route = RouteBuilder::new(kmh(90.0)).build().unwrap();
        assert!(route.all_pass(route.speed_limit(), Precision::default()));
        assert!(route.blocking(route.speed_limit(), Precision::default()).is_empty());
    }

    #[test]
    #[should_panic(expected = "stoplight index out of bounds")]
    fn test_stoplight_out_of_bounds_panics() {
        let route = RouteBuilder::new(kmh(90.0)).build().unwrap();
        let _ = route.stoplight(StoplightIndex::new(0));
    }

    #[test]
    fn test_error_display() {
        let e = RouteError::InvalidDuration {
            index: StoplightIndex::new(3),
            duration: 0.0,
        };
        assert_eq!(
            e.to_string(),
            "Stoplight 3 has invalid duration 0 (must be finite and positive)"
        );
        assert_eq!(
            RouteError::InvalidSpeedLimit(kmh(0.0)).to_string(),
            "Speed limit must be positive, got 0 km/h"
        );
    }
}
