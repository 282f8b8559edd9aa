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

//! Physical quantities used by the route model.
//!
//! Distances are meters, durations are seconds, and every speed the optimizer
//! touches is meters per second. Kilometers per hour only appear at the
//! boundaries: the speed limit read from input and the speed reported back.
//! The two conversions between them are defined here and nowhere else:
//!
//! * `km/h -> m/s`: `kmh / 3.6`
//! * `m/s -> reported km/h`: `floor(round(mps * 3.6, precision))`
//!
//! The reported conversion is floor biased on purpose, a reported speed is
//! never faster than the computed one.

use greenwave_core::num::precision::Precision;

const KMH_PER_MPS: f64 = 3.6;

/// A distance in meters.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
pub struct Meters(f64);

/// A duration in seconds.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
pub struct Seconds(f64);

/// A speed in meters per second.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
pub struct MetersPerSecond(f64);

/// A speed in kilometers per hour.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
pub struct KilometersPerHour(f64);

macro_rules! impl_quantity {
    ($name:ident, $unit:literal) => {
        impl $name {
            /// Wraps a raw value.
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Returns the raw value.
            #[inline]
            pub const fn value(&self) -> f64 {
                self.0
            }

            /// Returns `true` if the value is finite and strictly positive.
            #[inline]
            pub fn is_positive(&self) -> bool {
                self.0.is_finite() && self.0 > 0.0
            }
        }

        impl From<f64> for $name {
            #[inline]
            fn from(value: f64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for f64 {
            #[inline]
            fn from(q: $name) -> Self {
                q.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", self.0, $unit)
            }
        }
    };
}

impl_quantity!(Meters, "m");
impl_quantity!(Seconds, "s");
impl_quantity!(MetersPerSecond, "m/s");
impl_quantity!(KilometersPerHour, "km/h");

impl KilometersPerHour {
    /// Converts to meters per second (`kmh / 3.6`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_model::units::KilometersPerHour;
    ///
    /// assert_eq!(KilometersPerHour::new(36.0).to_meters_per_second().value(), 10.0);
    /// ```
    #[inline]
    pub fn to_meters_per_second(self) -> MetersPerSecond {
        MetersPerSecond(self.0 / KMH_PER_MPS)
    }
}

impl MetersPerSecond {
    /// Converts to kilometers per hour without any rounding.
    #[inline]
    pub fn to_kilometers_per_hour(self) -> KilometersPerHour {
        KilometersPerHour(self.0 * KMH_PER_MPS)
    }

    /// Converts to the whole number of kilometers per hour that is reported
    /// to the user: `floor(round(mps * 3.6, precision))`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::num::precision::Precision;
    /// # use greenwave_model::units::MetersPerSecond;
    ///
    /// let p = Precision::default();
    /// assert_eq!(MetersPerSecond::new(13.8).to_reported_kilometers_per_hour(p).value(), 49.0);
    /// assert_eq!(MetersPerSecond::new(50.0 / 3.6).to_reported_kilometers_per_hour(p).value(), 50.0);
    /// ```
    #[inline]
    pub fn to_reported_kilometers_per_hour(self, precision: Precision) -> KilometersPerHour {
        KilometersPerHour(precision.floor_rounded(self.0 * KMH_PER_MPS))
    }

    /// Returns the speed the vehicle would actually be reported to drive:
    /// the reported kilometers per hour converted back to meters per second.
    ///
    /// Stoplight parity is decided on this quantized speed so that the
    /// reported answer, not an unreportable fraction of it, is what passes.
    #[inline]
    pub fn quantized(self, precision: Precision) -> MetersPerSecond {
        self.to_reported_kilometers_per_hour(precision)
            .to_meters_per_second()
    }
}

impl std::ops::Div<MetersPerSecond> for Meters {
    type Output = Seconds;

    #[inline]
    fn div(self, rhs: MetersPerSecond) -> Seconds {
        Seconds(self.0 / rhs.0)
    }
}

impl std::ops::Div<Seconds> for Meters {
    type Output = MetersPerSecond;

    #[inline]
    fn div(self, rhs: Seconds) -> MetersPerSecond {
        MetersPerSecond(self.0 / rhs.0)
    }
}

impl std::ops::Mul<f64> for Seconds {
    type Output = Seconds;

    #[inline]
    fn mul(self, rhs: f64) -> Seconds {
        Seconds(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kmh_to_mps() {
        assert_eq!(KilometersPerHour::new(36.0).to_meters_per_second().value(), 10.0);
        assert_eq!(KilometersPerHour::new(0.0).to_meters_per_second().value(), 0.0);
        let fifty = KilometersPerHour::new(50.0).to_meters_per_second().value();
        assert!((fifty - 13.888_888_888_888_89).abs() < 1e-12);
    }

    #[test]
    fn test_reported_kmh_is_floor_biased() {
        let p = Precision::default();
        assert_eq!(MetersPerSecond::new(10.0).to_reported_kilometers_per_hour(p).value(), 36.0);
        // 9.99 m/s = 35.964 km/h, never reported as 36
        assert_eq!(MetersPerSecond::new(9.99).to_reported_kilometers_per_hour(p).value(), 35.0);
        assert_eq!(MetersPerSecond::new(0.1).to_reported_kilometers_per_hour(p).value(), 0.0);
    }

    #[test]
    fn test_round_trip_from_limit_is_stable() {
        let p = Precision::default();
        for kmh in [1.0, 18.0, 36.0, 50.0, 90.0, 130.0] {
            let mps = KilometersPerHour::new(kmh).to_meters_per_second();
            assert_eq!(mps.to_reported_kilometers_per_hour(p).value(), kmh);
        }
    }

    #[test]
    fn test_quantized_drops_fraction() {
        let p = Precision::default();
        // 10.2 m/s = 36.72 km/h -> 36 km/h -> 10 m/s
        assert_eq!(MetersPerSecond::new(10.2).quantized(p).value(), 10.0);
        assert_eq!(MetersPerSecond::new(0.2).quantized(p).value(), 0.0);
    }

    #[test]
    fn test_unit_arithmetic() {
        let t = Meters::new(100.0) / MetersPerSecond::new(4.0);
        assert_eq!(t, Seconds::new(25.0));
        let v = Meters::new(100.0) / Seconds::new(20.0);
        assert_eq!(v, MetersPerSecond::new(5.0));
        assert_eq!(Seconds::new(30.0) * 3.0, Seconds::new(90.0));
    }

    #[test]
    fn test_is_positive() {
        assert!(MetersPerSecond::new(0.5).is_positive());
        assert!(!MetersPerSecond::new(0.0).is_positive());
        assert!(!MetersPerSecond::new(-1.0).is_positive());
        assert!(!MetersPerSecond::new(f64::INFINITY).is_positive());
        assert!(!MetersPerSecond::new(f64::NAN).is_positive());
    }

    #[test]
    fn test_display_carries_unit() {
        assert_eq!(format!("{}", Meters::new(12.5)), "12.5 m");
        assert_eq!(format!("{}", KilometersPerHour::new(50.0)), "50 km/h");
    }
}
