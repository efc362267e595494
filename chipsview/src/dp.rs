//! # Density-Independent Pixels (Dp)
//!
//! Configuration sizes (chip height, row spacing, margins) are expressed in
//! [`Dp`] so that a chips control looks the same on low and high density
//! screens. Unlike a process-wide scale factor, the density used for the
//! conversion is supplied explicitly, normally from
//! [`ChipsConfig::density`](crate::ChipsConfig::density).
//!
//! ## Usage
//!
//! ```
//! use chipsview::{dp::Dp, px::Px};
//!
//! let chip_height = Dp(24.0);
//! assert_eq!(chip_height.to_px(2.0), Px::new(48));
//! assert_eq!(Dp(5.0).to_px(2.75), Px::new(13));
//! ```

use crate::px::Px;

/// Density-independent pixels.
///
/// One dp equals `density` physical pixels; a density of 1.0 maps one dp to
/// one pixel.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dp(pub f64);

impl Dp {
    /// Creates a new `Dp`. Usable in const contexts.
    ///
    /// ```
    /// use chipsview::dp::Dp;
    ///
    /// const CHIP_HEIGHT: Dp = Dp::new(24.0);
    /// assert_eq!(CHIP_HEIGHT.0, 24.0);
    /// ```
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts to physical pixels at the given density.
    ///
    /// The result is truncated, matching how platform layout params round
    /// dp-derived sizes.
    pub fn to_px(self, density: f64) -> Px {
        Px::saturating_from_f64(self.0 * density)
    }

    /// Returns `true` if the value is finite and not negative.
    pub fn is_valid_length(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}
