//! Greedy flow wrapping of chips into rows.
//!
//! ## Usage
//!
//! Feed the container width and the rendered width of every chip, in
//! collection order, to [`FlowLayout::partition`]. The result tells the
//! renderer which chips go on which row and tells the text-margin coordinator
//! how much of the last row is taken.
//!
//! ```
//! use chipsview::{flow_layout::FlowLayout, px::Px};
//!
//! let partition = FlowLayout::default()
//!     .partition(Px(100), [Px(40), Px(40), Px(40)])
//!     .expect("width is known");
//! assert_eq!(partition.row_count(), 2);
//! assert_eq!(partition.rows()[0].as_slice(), &[0, 1]);
//! assert_eq!(partition.rows()[1].as_slice(), &[2]);
//! assert_eq!(partition.last_row_used_width(), Px(40));
//! ```
use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

use crate::px::Px;

/// Indices of the chips placed on one row, in collection order.
pub type RowIndices = SmallVec<[usize; 8]>;

/// The container has not been measured yet, so rows cannot be computed.
///
/// This is a retry signal rather than a failure: the caller should run the
/// layout again after the next layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("container width is not known yet")]
pub struct LayoutNotReady;

/// Output of [`FlowLayout::partition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPartition {
    rows: Vec<RowIndices>,
    last_row_used_width: Px,
}

impl RowPartition {
    /// The rows, top to bottom. There is always at least one row: the row the
    /// text cursor shares with the trailing chips. It may be empty.
    pub fn rows(&self) -> &[RowIndices] {
        &self.rows
    }

    /// Number of rows, including a reserved empty trailing row.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width occupied by chips on the last row.
    pub fn last_row_used_width(&self) -> Px {
        self.last_row_used_width
    }

}

/// Row packing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    reserve_fraction: f32,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RESERVE_FRACTION)
    }
}

impl FlowLayout {
    /// Share of the width kept free for the text cursor unless a new row is
    /// started.
    pub const DEFAULT_RESERVE_FRACTION: f32 = 0.15;

    /// Creates a layout with a custom reserve fraction.
    pub fn new(reserve_fraction: f32) -> Self {
        Self { reserve_fraction }
    }

    /// Packs chips left to right into rows no wider than `width`.
    ///
    /// A chip moves to a new row when adding it would exceed `width`; a chip
    /// that fills the row exactly stays. The check also applies to an empty
    /// row, so a chip wider than `width` leaves an empty row behind it. If the
    /// space left after the last chip is below the reserve fraction, an empty
    /// row is appended and the used width becomes zero.
    ///
    /// Widths are expected to include each chip's trailing margin.
    pub fn partition<I>(&self, width: Px, chip_widths: I) -> Result<RowPartition, LayoutNotReady>
    where
        I: IntoIterator<Item = Px>,
    {
        if width.is_unmeasured() {
            return Err(LayoutNotReady);
        }

        let mut rows: Vec<RowIndices> = Vec::new();
        let mut current_row = RowIndices::new();
        let mut used = Px::ZERO;

        for (index, chip_width) in chip_widths.into_iter().enumerate() {
            let chip_width = chip_width.positive();
            if used + chip_width > width {
                trace!(
                    "chip {index} ({chip_width}) overflows row {} at {used}/{width}",
                    rows.len()
                );
                rows.push(std::mem::take(&mut current_row));
                used = Px::ZERO;
            }
            current_row.push(index);
            used += chip_width;
        }
        rows.push(current_row);

        let remaining = width - used;
        if remaining.to_f32() < width.to_f32() * self.reserve_fraction {
            trace!("only {remaining} left of {width}; reserving a text row");
            rows.push(RowIndices::new());
            used = Px::ZERO;
        }

        Ok(RowPartition {
            rows,
            last_row_used_width: used,
        })
    }
}
