//! Physical pixel values used by the chip layout.
//!
//! Every width the host reports (container width, chip widths) and every
//! value the layout produces (row usage, text margin, heights) is a [`Px`].
//! Density-independent sizes from [`ChipsConfig`](crate::ChipsConfig) are
//! resolved into `Px` once, with the density the config carries.
//!
//! # Example
//!
//! ```
//! use chipsview::px::Px;
//!
//! let width = Px::new(100);
//! let used = Px::new(40) + Px::new(40);
//! assert_eq!(width - used, Px::new(20));
//! assert_eq!(width * 2, Px::new(200));
//! ```

use std::ops::{Add, AddAssign, Mul, Sub};

/// A physical pixel length.
///
/// Negative values are representable so that differences such as
/// `width - used` can go below zero without wrapping; use
/// [`positive`](Self::positive) when a non-negative value is required.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// The largest representable pixel value.
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a new `Px` from a raw value.
    ///
    /// # Examples
    ///
    /// ```
    /// use chipsview::px::Px;
    ///
    /// assert_eq!(Px::new(24).raw(), 24);
    /// ```
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Returns the raw i32 value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns `true` for zero or negative lengths.
    ///
    /// A container reporting such a width has not been laid out yet.
    pub const fn is_unmeasured(self) -> bool {
        self.0 <= 0
    }

    /// Returns the value clamped to zero from below.
    ///
    /// # Examples
    ///
    /// ```
    /// use chipsview::px::Px;
    ///
    /// assert_eq!(Px::new(-5).positive(), Px::ZERO);
    /// assert_eq!(Px::new(7).positive(), Px::new(7));
    /// ```
    pub fn positive(self) -> Self {
        Px(self.0.max(0))
    }

    /// Converts the pixel value to f32.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Creates a `Px` from an f64, saturating at the numeric bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use chipsview::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f64(42.7), Px::new(42));
    /// assert_eq!(Px::saturating_from_f64(f64::MAX), Px::MAX);
    /// ```
    pub fn saturating_from_f64(value: f64) -> Self {
        Px(value.clamp(i32::MIN as f64, i32::MAX as f64) as i32)
    }

    /// Saturating addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Px(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl Mul<i32> for Px {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Px(self.0.saturating_mul(rhs))
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Px {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Px::ZERO, Add::add)
    }
}

impl std::fmt::Display for Px {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_arithmetic() {
        let a = Px(10);
        let b = Px(5);

        assert_eq!(a + b, Px(15));
        assert_eq!(a - b, Px(5));
        assert_eq!(a * 2, Px(20));
        assert_eq!((b - a).positive(), Px::ZERO);
    }

    #[test]
    fn test_px_saturates_instead_of_wrapping() {
        assert_eq!(Px::MAX + Px(1), Px::MAX);
        assert_eq!(Px(i32::MIN) - Px(1), Px(i32::MIN));
        assert_eq!(Px::MAX * 2, Px::MAX);
    }

    #[test]
    fn test_unmeasured_width() {
        assert!(Px::ZERO.is_unmeasured());
        assert!(Px(-1).is_unmeasured());
        assert!(!Px(1).is_unmeasured());
    }

    #[test]
    fn test_px_sum() {
        let total: Px = [Px(40), Px(40), Px(20)].into_iter().sum();
        assert_eq!(total, Px(100));
    }
}
