//! Immutable configuration for a chips control.
//!
//! ## Usage
//!
//! Build one [`ChipsConfig`] per control, adjust it with the generated
//! setters, and hand it to [`ChipsView::new`](crate::ChipsView::new). The
//! config is validated there and never re-derived per chip.
//!
//! ```
//! use chipsview::{ChipsConfig, dp::Dp};
//!
//! let config = ChipsConfig::default()
//!     .density(2.0)
//!     .chip_height(Dp(32.0))
//!     .max_height(Dp(120.0));
//! assert!(config.validate().is_ok());
//! assert_eq!(config.metrics().row_height.raw(), 66);
//! ```
use derive_setters::Setters;
use thiserror::Error;

use crate::{dp::Dp, px::Px};

/// Errors reported when a [`ChipsConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The density is zero, negative, or not finite.
    #[error("density must be a positive finite number, got {0}")]
    InvalidDensity(f64),
    /// A length field holds a negative or non-finite value.
    #[error("`{field}` must be a non-negative finite length, got {value}dp")]
    InvalidLength {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value in dp.
        value: f64,
    },
    /// The reserve fraction is outside `[0, 1)`.
    #[error("reserve_fraction must be within [0, 1), got {0}")]
    InvalidReserveFraction(f32),
    /// Labels would be truncated to nothing.
    #[error("max_label_len must be at least 1")]
    ZeroLabelLength,
}

/// Layout and label parameters of a chips control.
///
/// All lengths are in [`Dp`] and resolved against [`density`](Self::density)
/// by [`metrics`](Self::metrics).
#[derive(Debug, Clone, PartialEq, Setters)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ChipsConfig {
    /// Physical pixels per dp.
    pub density: f64,
    /// Height of a single chip.
    pub chip_height: Dp,
    /// Vertical gap added below every chip row.
    pub vertical_spacing: Dp,
    /// Padding above the first chip row.
    pub spacing_top: Dp,
    /// Left margin of the text field inside the container.
    pub text_leading_margin: Dp,
    /// Margin to the right of each chip. Hosts add it to measured chip
    /// widths before reporting them.
    pub chip_end_margin: Dp,
    /// Maximum height of the visible viewport; content beyond it scrolls.
    #[setters(strip_option)]
    pub max_height: Option<Dp>,
    /// Minimum share of the row width kept free for the text cursor after
    /// the last chip. Below it, the text moves to a fresh row.
    pub reserve_fraction: f32,
    /// Maximum label length in user-perceived characters before truncation.
    pub max_label_len: usize,
    /// Number of consecutive deferred relayouts after which a warning is
    /// logged.
    pub relayout_warn_after: u32,
}

impl Default for ChipsConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            chip_height: Dp(24.0),
            vertical_spacing: Dp(1.0),
            spacing_top: Dp(4.0),
            text_leading_margin: Dp(5.0),
            chip_end_margin: Dp(4.0),
            max_height: None,
            reserve_fraction: 0.15,
            max_label_len: crate::chip::MAX_LABEL_LENGTH,
            relayout_warn_after: 8,
        }
    }
}

impl ChipsConfig {
    /// Checks every field and returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ConfigError::InvalidDensity(self.density));
        }

        let lengths = [
            ("chip_height", Some(self.chip_height)),
            ("vertical_spacing", Some(self.vertical_spacing)),
            ("spacing_top", Some(self.spacing_top)),
            ("text_leading_margin", Some(self.text_leading_margin)),
            ("chip_end_margin", Some(self.chip_end_margin)),
            ("max_height", self.max_height),
        ];
        for (field, value) in lengths {
            if let Some(value) = value
                && !value.is_valid_length()
            {
                return Err(ConfigError::InvalidLength {
                    field,
                    value: value.0,
                });
            }
        }

        if !(0.0..1.0).contains(&self.reserve_fraction) {
            return Err(ConfigError::InvalidReserveFraction(self.reserve_fraction));
        }
        if self.max_label_len == 0 {
            return Err(ConfigError::ZeroLabelLength);
        }
        Ok(())
    }

    /// Resolves the dp lengths into physical pixels.
    pub fn metrics(&self) -> ChipMetrics {
        let chip_height = self.chip_height.to_px(self.density);
        let vertical_spacing = self.vertical_spacing.to_px(self.density);
        ChipMetrics {
            chip_height,
            row_height: chip_height + vertical_spacing,
            spacing_top: self.spacing_top.to_px(self.density),
            text_leading_margin: self.text_leading_margin.to_px(self.density),
            chip_end_margin: self.chip_end_margin.to_px(self.density),
            max_height: self.max_height.map(|height| height.to_px(self.density)),
        }
    }
}

/// Pixel values derived from a [`ChipsConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipMetrics {
    /// Height of a chip.
    pub chip_height: Px,
    /// Height of a chip row including the vertical spacing below it.
    pub row_height: Px,
    /// Padding above the first row.
    pub spacing_top: Px,
    /// Left margin of the text field.
    pub text_leading_margin: Px,
    /// Right margin of every chip.
    pub chip_end_margin: Px,
    /// Viewport height limit.
    pub max_height: Option<Px>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ChipsConfig::default().validate(), Ok(()));
    }

    #[test]
    fn metrics_apply_density_once() {
        let metrics = ChipsConfig::default().density(2.0).metrics();
        assert_eq!(metrics.chip_height, Px(48));
        assert_eq!(metrics.row_height, Px(50));
        assert_eq!(metrics.spacing_top, Px(8));
        assert_eq!(metrics.text_leading_margin, Px(10));
        assert_eq!(metrics.chip_end_margin, Px(8));
        assert_eq!(metrics.max_height, None);
    }

    #[test]
    fn rejects_bad_density() {
        let err = ChipsConfig::default().density(0.0).validate();
        assert_eq!(err, Err(ConfigError::InvalidDensity(0.0)));
    }

    #[test]
    fn rejects_negative_lengths() {
        let err = ChipsConfig::default().max_height(Dp(-3.0)).validate();
        assert_eq!(
            err,
            Err(ConfigError::InvalidLength {
                field: "max_height",
                value: -3.0,
            })
        );
    }

    #[test]
    fn rejects_reserve_fraction_of_one() {
        let err = ChipsConfig::default().reserve_fraction(1.0).validate();
        assert_eq!(err, Err(ConfigError::InvalidReserveFraction(1.0)));
    }

    #[test]
    fn rejects_zero_label_length() {
        let err = ChipsConfig::default().max_label_len(0).validate();
        assert_eq!(err, Err(ConfigError::ZeroLabelLength));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_fills_defaults() {
        let config: ChipsConfig =
            serde_json::from_str(r#"{ "density": 3.0, "max_height": 96.0 }"#)
                .expect("config should deserialize");
        assert_eq!(config.density, 3.0);
        assert_eq!(config.max_height, Some(Dp(96.0)));
        assert_eq!(config.chip_height, Dp(24.0));
    }
}
