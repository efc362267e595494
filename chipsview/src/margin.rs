//! Indents the text field so it continues after the last chip row.
use tracing::debug;

use crate::{
    flow_layout::RowPartition,
    text_buffer::{LeadingMargin, TextBuffer},
};

/// Computes the first-line margin that lets the text start right after the
/// chips on the last row.
pub fn margin_for(partition: &RowPartition) -> LeadingMargin {
    LeadingMargin::first_line(partition.last_row_used_width())
}

/// Replaces the text buffer's leading margin with the one derived from
/// `partition` and returns it.
///
/// Runs after every chip change, so an empty collection collapses the margin
/// back to zero.
pub fn apply_text_margin(buffer: &mut TextBuffer, partition: &RowPartition) -> LeadingMargin {
    let margin = margin_for(partition);
    if buffer.leading_margin() != Some(margin) {
        debug!("text margin -> {}", margin.first_line);
    }
    buffer.set_leading_margin(margin);
    margin
}
