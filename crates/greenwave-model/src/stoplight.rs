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

//! A single periodically cycling stoplight.
//!
//! A stoplight sits at a fixed distance from the start of the route and
//! alternates between a passable and a blocking half-cycle of equal length.
//! Time starts at zero when the vehicle leaves the start, so the half-cycle
//! the vehicle arrives in is `floor(round(distance / speed) / duration)`;
//! even half-cycles are green, odd ones are red.
//!
//! Besides the yes/no question ("does this speed pass?") a stoplight also
//! answers the question the optimizer actually iterates on: which speeds, no
//! faster than a given reference speed, arrive inside the nearest green
//! window.

use crate::units::{Meters, MetersPerSecond, Seconds};
use greenwave_core::{math::interval::ClosedInterval, num::precision::Precision};

/// A closed interval of speeds in meters per second.
pub type SpeedInterval = ClosedInterval<f64>;

/// Which half of its cycle a stoplight is in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Phase {
    /// Even half-cycle, the vehicle may pass.
    Green,
    /// Odd half-cycle, the vehicle has to stop.
    Red,
}

impl Phase {
    /// Phase of the given half-cycle number.
    ///
    /// Non-finite cycle numbers (an arrival that never happens) are `Red`.
    #[inline]
    pub fn of_cycle(cycle: f64) -> Self {
        if cycle.is_finite() && cycle % 2.0 == 0.0 {
            Phase::Green
        } else {
            Phase::Red
        }
    }

    /// Returns `true` if the vehicle may pass.
    #[inline]
    pub fn is_green(&self) -> bool {
        matches!(self, Phase::Green)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Green => write!(f, "Green"),
            Phase::Red => write!(f, "Red"),
        }
    }
}

/// The reason a stoplight could not be constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoplightError {
    /// The distance is negative or not finite.
    InvalidDistance(f64),
    /// The half-cycle duration is not strictly positive or not finite.
    InvalidDuration(f64),
}

impl std::fmt::Display for StoplightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDistance(d) => {
                write!(f, "Stoplight distance must be finite and non-negative, got {d}")
            }
            Self::InvalidDuration(d) => {
                write!(f, "Stoplight duration must be finite and positive, got {d}")
            }
        }
    }
}

impl std::error::Error for StoplightError {}

/// A stoplight at `distance` from the start whose phase flips every `duration`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stoplight {
    distance: Meters,
    duration: Seconds,
}

impl Stoplight {
    /// Creates a new `Stoplight`.
    ///
    /// # Panics
    ///
    /// Panics if the distance is negative or the duration is not strictly
    /// positive (or either is not finite).
    #[inline]
    pub fn new(distance: Meters, duration: Seconds) -> Self {
        match Self::try_new(distance, duration) {
            Ok(s) => s,
            Err(e) => panic!("called `Stoplight::new` with invalid arguments: {e}"),
        }
    }

    /// Creates a new `Stoplight`, validating both arguments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_model::stoplight::{Stoplight, StoplightError};
    /// # use greenwave_model::units::{Meters, Seconds};
    ///
    /// assert!(Stoplight::try_new(Meters::new(100.0), Seconds::new(10.0)).is_ok());
    /// assert_eq!(
    ///     Stoplight::try_new(Meters::new(100.0), Seconds::new(0.0)),
    ///     Err(StoplightError::InvalidDuration(0.0))
    /// );
    /// ```
    pub fn try_new(distance: Meters, duration: Seconds) -> Result<Self, StoplightError> {
        let d = distance.value();
        if !d.is_finite() || d < 0.0 {
            return Err(StoplightError::InvalidDistance(d));
        }
        if !duration.is_positive() {
            return Err(StoplightError::InvalidDuration(duration.value()));
        }
        Ok(Self { distance, duration })
    }

    /// Distance of the stoplight from the start of the route.
    #[inline]
    pub fn distance(&self) -> Meters {
        self.distance
    }

    /// Length of one green or red half-cycle.
    #[inline]
    pub fn duration(&self) -> Seconds {
        self.duration
    }

    /// Half-cycle number the vehicle arrives in when driving at `speed`.
    ///
    /// The arrival time is rounded to `precision` before dividing so that an
    /// arrival exactly on a boundary is not pushed into the previous
    /// half-cycle by floating point noise.
    #[inline]
    pub fn arrival_cycle(&self, speed: MetersPerSecond, precision: Precision) -> f64 {
        let arrival = self.distance / speed;
        (precision.round(arrival.value()) / self.duration.value()).floor()
    }

    /// Phase the stoplight shows when the vehicle arrives at `speed`.
    #[inline]
    pub fn phase_at_speed(&self, speed: MetersPerSecond, precision: Precision) -> Phase {
        Phase::of_cycle(self.arrival_cycle(speed, precision))
    }

    /// Returns `true` if driving at `speed` arrives during a green phase.
    ///
    /// The speed is first quantized to what would be reported (whole km/h,
    /// floored), so a speed that only passes thanks to a fraction that is
    /// lost on output does not count. A quantized speed of zero never
    /// arrives and therefore never passes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::num::precision::Precision;
    /// # use greenwave_model::stoplight::Stoplight;
    /// # use greenwave_model::units::{Meters, MetersPerSecond, Seconds};
    ///
    /// let light = Stoplight::new(Meters::new(100.0), Seconds::new(10.0));
    /// let p = Precision::default();
    /// // 10 s arrival: second half-cycle, red
    /// assert!(!light.can_pass(MetersPerSecond::new(10.0), p));
    /// // 20 s arrival: third half-cycle, green
    /// assert!(light.can_pass(MetersPerSecond::new(5.0), p));
    /// ```
    pub fn can_pass(&self, speed: MetersPerSecond, precision: Precision) -> bool {
        let quantized = speed.quantized(precision);
        if !quantized.is_positive() {
            return false;
        }
        self.phase_at_speed(quantized, precision).is_green()
    }

    /// Speeds no faster than `reference` that arrive during the green window
    /// this stoplight targets.
    ///
    /// The targeted window is the half-cycle the vehicle arrives in at
    /// `reference` if that speed passes, otherwise the half-cycle right
    /// after it. For a window `[t_min, t_max)` the speeds are
    /// `[distance / t_max, min(distance / t_min, reference)]`, where a window
    /// starting at time zero has no upper speed bound besides `reference`.
    ///
    /// `reference` must be strictly positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::num::precision::Precision;
    /// # use greenwave_model::stoplight::Stoplight;
    /// # use greenwave_model::units::{Meters, MetersPerSecond, Seconds};
    ///
    /// let light = Stoplight::new(Meters::new(100.0), Seconds::new(10.0));
    /// let iv = light.feasible_speed_interval(MetersPerSecond::new(10.0), Precision::default());
    /// // arrival window [20 s, 30 s)
    /// assert_eq!(iv.upper(), 5.0);
    /// assert!((iv.lower() - 100.0 / 30.0).abs() < 1e-12);
    /// ```
    pub fn feasible_speed_interval(
        &self,
        reference: MetersPerSecond,
        precision: Precision,
    ) -> SpeedInterval {
        debug_assert!(
            reference.is_positive(),
            "called `Stoplight::feasible_speed_interval` with a non-positive reference speed: {}",
            reference
        );

        let cycle = self.arrival_cycle(reference, precision);
        let padding = if self.can_pass(reference, precision) {
            0.0
        } else {
            1.0
        };

        let min_time = self.duration * (cycle + padding);
        let max_time = self.duration * (cycle + 1.0 + padding);

        let min_speed = self.distance / max_time;
        let max_speed = if min_time.value() > 0.0 {
            self.distance / min_time
        } else {
            reference
        };

        let upper = max_speed.value().min(reference.value());
        // Rounding of the arrival time can put `min_speed` a hair above `upper`
        let lower = min_speed.value().min(upper);
        SpeedInterval::new(lower, upper)
    }
}

impl std::fmt::Display for Stoplight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stoplight(distance: {}, duration: {})",
            self.distance, self.duration
        )
    }
}
