//! Text model of the input field that follows the chips.
//!
//! ## Usage
//!
//! [`TextBuffer`] holds the typed query, the cursor and the single
//! leading-margin annotation that indents the first line past the last chip
//! row. Renderers read it; edits go through
//! [`ChipsView`](crate::ChipsView) so that text-changed listeners fire.
use unicode_segmentation::UnicodeSegmentation;

use crate::px::Px;

/// Indentation annotation attached to the start of the text.
///
/// It covers a zero-length range at offset 0 and therefore affects line
/// indentation only, never the text itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadingMargin {
    /// Indentation of the first visual line.
    pub first_line: Px,
    /// Indentation of every following line.
    pub rest: Px,
}

impl LeadingMargin {
    /// A margin that indents only the first line.
    pub fn first_line(first_line: Px) -> Self {
        Self {
            first_line,
            rest: Px::ZERO,
        }
    }
}

/// Editable text with a grapheme-aligned cursor.
///
/// ```
/// use chipsview::text_buffer::TextBuffer;
///
/// let mut buffer = TextBuffer::new();
/// buffer.insert("ne\u{301}e");
/// assert!(buffer.delete_backward(1));
/// assert!(buffer.delete_backward(1));
/// assert_eq!(buffer.text(), "n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    leading_margin: Option<LeadingMargin>,
}

impl TextBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Cursor position as a byte offset on a grapheme boundary.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The leading margin currently applied, if any.
    pub fn leading_margin(&self) -> Option<LeadingMargin> {
        self.leading_margin
    }

    /// Replaces the text and puts the cursor at its end.
    ///
    /// Returns `true` if the text changed. The leading margin is kept.
    pub fn set_text(&mut self, text: &str) -> bool {
        let changed = self.text != text;
        if changed {
            self.text.clear();
            self.text.push_str(text);
        }
        self.cursor = self.text.len();
        changed
    }

    /// Inserts `text` at the cursor and moves the cursor after it.
    pub fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
        true
    }

    /// Deletes up to `count` graphemes before the cursor.
    ///
    /// Returns `true` if anything was removed.
    pub fn delete_backward(&mut self, count: usize) -> bool {
        let start = self.text[..self.cursor]
            .grapheme_indices(true)
            .rev()
            .take(count)
            .last()
            .map_or(self.cursor, |(index, _)| index);
        if start == self.cursor {
            return false;
        }
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    /// Deletes up to `count` graphemes after the cursor.
    pub fn delete_forward(&mut self, count: usize) -> bool {
        let len: usize = self.text[self.cursor..]
            .graphemes(true)
            .take(count)
            .map(str::len)
            .sum();
        if len == 0 {
            return false;
        }
        self.text.replace_range(self.cursor..self.cursor + len, "");
        true
    }

    /// Moves the cursor, snapping down to the closest grapheme boundary.
    pub fn set_cursor(&mut self, offset: usize) {
        let offset = offset.min(self.text.len());
        self.cursor = self
            .text
            .grapheme_indices(true)
            .map(|(index, _)| index)
            .take_while(|&index| index <= offset)
            .last()
            .unwrap_or(0);
        if offset == self.text.len() {
            self.cursor = offset;
        }
    }

    /// Moves the cursor after the last character.
    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Replaces any existing leading margin with `margin`.
    pub(crate) fn set_leading_margin(&mut self, margin: LeadingMargin) {
        self.leading_margin = Some(margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_reports_changes_and_moves_cursor() {
        let mut buffer = TextBuffer::new();
        assert!(buffer.set_text("bob"));
        assert_eq!(buffer.cursor(), 3);
        assert!(!buffer.set_text("bob"));
        assert!(buffer.set_text(""));
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn insert_at_cursor() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("ac");
        buffer.set_cursor(1);
        assert!(buffer.insert("b"));
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 2);
        assert!(!buffer.insert(""));
    }

    #[test]
    fn delete_backward_on_empty_text_is_noop() {
        let mut buffer = TextBuffer::new();
        assert!(!buffer.delete_backward(1));
    }

    #[test]
    fn delete_backward_removes_whole_graphemes() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("a\u{1F44D}\u{1F3FD}");
        assert!(buffer.delete_backward(1));
        assert_eq!(buffer.text(), "a");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn delete_backward_counts_graphemes() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("hello");
        assert!(buffer.delete_backward(3));
        assert_eq!(buffer.text(), "he");
        assert!(buffer.delete_backward(10));
        assert!(buffer.is_empty());
    }

    #[test]
    fn delete_forward_keeps_cursor() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("abcd");
        buffer.set_cursor(1);
        assert!(buffer.delete_forward(2));
        assert_eq!(buffer.text(), "ad");
        assert_eq!(buffer.cursor(), 1);
        buffer.move_cursor_to_end();
        assert!(!buffer.delete_forward(1));
    }

    #[test]
    fn cursor_snaps_to_grapheme_boundary() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("e\u{301}x");
        buffer.set_cursor(2);
        assert_eq!(buffer.cursor(), 0);
        buffer.set_cursor(100);
        assert_eq!(buffer.cursor(), buffer.len());
    }

    #[test]
    fn margin_survives_text_edits() {
        let mut buffer = TextBuffer::new();
        buffer.set_leading_margin(LeadingMargin::first_line(Px(42)));
        buffer.set_text("query");
        buffer.delete_backward(5);
        assert_eq!(
            buffer.leading_margin(),
            Some(LeadingMargin {
                first_line: Px(42),
                rest: Px::ZERO,
            })
        );
    }
}
