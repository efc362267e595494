//! Measurement boundary between the chips core and the host's renderer.
//!
//! ## Usage
//!
//! Implement [`ChipMeasurer`] on top of whatever renders the chips. Text
//! shaping stays on the host side; the core only needs numbers.
use unicode_segmentation::UnicodeSegmentation;

use crate::{chip::Chip, config::ChipMetrics, px::Px};

/// Sizes supplied by the rendering side.
pub trait ChipMeasurer<K, V> {
    /// Current width of the chip container. Zero until the container has
    /// been laid out for the first time.
    fn container_width(&self) -> Px;

    /// Rendered width of `chip`, including its right margin.
    fn chip_width(&self, chip: &Chip<K, V>) -> Px;
}

/// Measures chips as cells of a fixed-width grid, as in a terminal.
///
/// A chip is `chrome + label_graphemes * cell_width + end_margin` wide, where
/// `chrome` covers padding and the avatar glyph.
///
/// ```
/// use chipsview::{Chip, measure::{ChipMeasurer, MonospaceMeasurer}, px::Px};
///
/// let measurer = MonospaceMeasurer::new(Px(1), Px(4), Px(1)).with_container_width(Px(40));
/// let chip = Chip::new(None, "alice".to_owned(), 1u32, false);
/// assert_eq!(measurer.chip_width(&chip), Px(10));
/// assert_eq!(measurer.container_width(), Px(40));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMeasurer {
    container_width: Px,
    cell_width: Px,
    chrome: Px,
    end_margin: Px,
}

impl MonospaceMeasurer {
    /// Creates a measurer for an unmeasured container.
    pub fn new(cell_width: Px, chrome: Px, end_margin: Px) -> Self {
        Self {
            container_width: Px::ZERO,
            cell_width,
            chrome,
            end_margin,
        }
    }

    /// Creates a measurer whose trailing gap is the configured chip end
    /// margin.
    ///
    /// ```
    /// use chipsview::{ChipsConfig, measure::MonospaceMeasurer, px::Px};
    ///
    /// let metrics = ChipsConfig::default().metrics();
    /// let measurer = MonospaceMeasurer::from_metrics(Px(8), Px(12), &metrics);
    /// assert_eq!(measurer, MonospaceMeasurer::new(Px(8), Px(12), Px(4)));
    /// ```
    pub fn from_metrics(cell_width: Px, chrome: Px, metrics: &ChipMetrics) -> Self {
        Self::new(cell_width, chrome, metrics.chip_end_margin)
    }

    /// Sets the container width.
    pub fn with_container_width(mut self, width: Px) -> Self {
        self.container_width = width;
        self
    }

    /// The container width last reported by the host.
    pub fn container_width(&self) -> Px {
        self.container_width
    }

    /// Updates the container width after the host resized it.
    pub fn set_container_width(&mut self, width: Px) {
        self.container_width = width;
    }
}

impl<K, V> ChipMeasurer<K, V> for MonospaceMeasurer {
    fn container_width(&self) -> Px {
        self.container_width
    }

    fn chip_width(&self, chip: &Chip<K, V>) -> Px {
        let cells = chip.label().graphemes(true).count();
        let cells = i32::try_from(cells).unwrap_or(i32::MAX);
        self.chrome + self.cell_width * cells + self.end_margin
    }
}
