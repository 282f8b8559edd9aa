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

use num_traits::Float;

/// A closed interval `[lower, upper]` over a floating point type.
///
/// The interval is immutable once constructed. Every set operation returns a
/// fresh value, so intervals can be passed around by copy without any
/// ownership concerns.
///
/// # Invariants
/// `lower` must always be less than or equal to `upper`, and neither bound may
/// be NaN. The degenerate interval `[0, 0]` doubles as the sentinel returned by
/// [`ClosedInterval::intersect`] when two intervals do not overlap.
#[derive(Clone, Copy, PartialEq)]
pub struct ClosedInterval<F>
where
    F: Float,
{
    lower: F,
    upper: F,
}

impl<F> ClosedInterval<F>
where
    F: Float,
{
    /// Creates a new `ClosedInterval`.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper` or if either bound is NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::math::interval::ClosedInterval;
    ///
    /// let iv = ClosedInterval::new(2.0, 5.0);
    /// assert_eq!(iv.width(), 3.0);
    /// ```
    #[inline]
    pub fn new(lower: F, upper: F) -> Self {
        assert!(
            !lower.is_nan() && !upper.is_nan(),
            "Invalid interval: bounds must not be NaN"
        );
        assert!(
            lower <= upper,
            "Invalid interval: lower must be less than or equal to upper"
        );
        Self { lower, upper }
    }

    /// Creates a new `ClosedInterval` if the bounds are valid.
    ///
    /// Returns `None` if `lower > upper` or if either bound is NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::math::interval::ClosedInterval;
    ///
    /// assert!(ClosedInterval::try_new(0.0, 1.0).is_some());
    /// assert!(ClosedInterval::try_new(1.0, 0.0).is_none());
    /// assert!(ClosedInterval::try_new(f64::NAN, 0.0).is_none());
    /// ```
    #[inline]
    pub fn try_new(lower: F, upper: F) -> Option<Self> {
        if lower <= upper {
            Some(Self { lower, upper })
        } else {
            None
        }
    }

    /// Returns the `[0, 0]` sentinel used to signal "no overlap".
    #[inline]
    pub fn degenerate() -> Self {
        Self {
            lower: F::zero(),
            upper: F::zero(),
        }
    }

    /// Returns `true` if this is the `[0, 0]` sentinel.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.lower == F::zero() && self.upper == F::zero()
    }

    /// Returns the lower bound.
    #[inline]
    pub fn lower(&self) -> F {
        self.lower
    }

    /// Returns the upper bound.
    #[inline]
    pub fn upper(&self) -> F {
        self.upper
    }

    /// Returns `upper - lower`.
    #[inline]
    pub fn width(&self) -> F {
        self.upper - self.lower
    }

    /// Returns `true` if `value` lies within `[lower, upper]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::math::interval::ClosedInterval;
    ///
    /// let iv = ClosedInterval::new(1.0, 2.0);
    /// assert!(iv.contains(1.0));
    /// assert!(iv.contains(2.0));
    /// assert!(!iv.contains(2.5));
    /// ```
    #[inline]
    pub fn contains(&self, value: F) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Returns the length of the overlap between `self` and `other`.
    ///
    /// A negative raw overlap (disjoint intervals) is clamped to zero, so
    /// touching intervals and disjoint intervals both report `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::math::interval::ClosedInterval;
    ///
    /// let a = ClosedInterval::new(0.0, 10.0);
    /// assert_eq!(a.overlap_length(ClosedInterval::new(5.0, 20.0)), 5.0);
    /// assert_eq!(a.overlap_length(ClosedInterval::new(10.0, 20.0)), 0.0);
    /// assert_eq!(a.overlap_length(ClosedInterval::new(15.0, 20.0)), 0.0);
    /// ```
    #[inline]
    pub fn overlap_length(&self, other: Self) -> F {
        let raw = self.upper.min(other.upper) - self.lower.max(other.lower);
        raw.max(F::zero())
    }

    /// Intersects two intervals, returning `None` when the overlap is not
    /// strictly positive.
    #[inline]
    pub fn intersection(&self, other: Self) -> Option<Self> {
        if self.overlap_length(other) > F::zero() {
            Some(Self {
                lower: self.lower.max(other.lower),
                upper: self.upper.min(other.upper),
            })
        } else {
            None
        }
    }

    /// Intersects two intervals, returning the `[0, 0]` sentinel when the
    /// overlap is not strictly positive.
    ///
    /// The sentinel does not say which side failed to overlap. Callers that
    /// care must branch on [`ClosedInterval::is_degenerate`] or on the upper
    /// bound being zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use greenwave_core::math::interval::ClosedInterval;
    ///
    /// let a = ClosedInterval::new(0.0, 5.0);
    /// let b = ClosedInterval::new(10.0, 20.0);
    /// assert_eq!(a.intersect(b), ClosedInterval::degenerate());
    ///
    /// let c = ClosedInterval::new(3.0, 8.0);
    /// assert_eq!(a.intersect(c), ClosedInterval::new(3.0, 5.0));
    /// ```
    #[inline]
    pub fn intersect(&self, other: Self) -> Self {
        self.intersection(other).unwrap_or_else(Self::degenerate)
    }
}

impl<F> std::fmt::Debug for ClosedInterval<F>
where
    F: Float + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClosedInterval[{:?}, {:?}]", self.lower, self.upper)
    }
}

impl<F> std::fmt::Display for ClosedInterval<F>
where
    F: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

impl<F> From<ClosedInterval<F>> for std::ops::RangeInclusive<F>
where
    F: Float,
{
    fn from(iv: ClosedInterval<F>) -> Self {
        iv.lower..=iv.upper
    }
}
