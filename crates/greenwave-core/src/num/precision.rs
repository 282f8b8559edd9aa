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

//! Fixed decimal rounding.
//!
//! Arrival times and reported speeds are rounded to a fixed number of decimal
//! places before any floor or parity decision is taken on them. Keeping that
//! rule in one value type avoids precision drift when a speed is converted
//! back and forth between units several times.
//!
//! Halves are rounded away from zero rather than to even. At the default five
//! decimals the two rules never move a floor or parity decision.

use num_traits::Float;

/// Number of decimal places used when rounding intermediate results.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Precision {
    decimals: u32,
}

impl Precision {
    /// Five decimal places.
    pub const DEFAULT_DECIMALS: u32 = 5;

    /// Largest supported number of decimals. Beyond this `10^decimals`
    /// no longer fits the mantissa of an `f64` exactly.
    pub const MAX_DECIMALS: u32 = 15;

    /// Creates a new `Precision`.
    ///
    /// # Panics
    ///
    /// Panics if `decimals > Precision::MAX_DECIMALS`.
    #[inline]
    pub fn new(decimals: u32) -> Self {
        assert!(
            decimals <= Self::MAX_DECIMALS,
            "called `Precision::new` with {} decimals, the maximum is {}",
            decimals,
            Self::MAX_DECIMALS
        );
        Self { decimals }
    }

    /// Returns the number of decimal places.
    #[inline]
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }

    #[inline]
    fn scale<F: Float>(&self) -> F {
        // `decimals <= 15`, always representable.
        F::from(10f64.powi(self.decimals as i32)).unwrap_or_else(F::one)
    }

    /// Rounds `value` to `decimals` places, halves away from zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::num::precision::Precision;
    ///
    /// let p = Precision::new(2);
    /// assert_eq!(p.round(1.234), 1.23);
    /// assert_eq!(p.round(-1.236), -1.24);
    /// ```
    #[inline]
    pub fn round<F: Float>(&self, value: F) -> F {
        let scale = self.scale::<F>();
        (value * scale).round() / scale
    }

    /// Rounds `value` and then takes the floor.
    ///
    /// Values a hair below an integer due to floating point noise are lifted
    /// onto it by the rounding step before the floor is applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::num::precision::Precision;
    ///
    /// let p = Precision::default();
    /// assert_eq!(p.floor_rounded(49.999999999), 50.0);
    /// assert_eq!(p.floor_rounded(49.99), 49.0);
    /// ```
    #[inline]
    pub fn floor_rounded<F: Float>(&self, value: F) -> F {
        self.round(value).floor()
    }
}

impl Default for Precision {
    #[inline]
    fn default() -> Self {
        Self::new(Self::DEFAULT_DECIMALS)
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Precision({} decimals)", self.decimals)
    }
}
