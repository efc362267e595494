//! Interception of editor input before it reaches the text buffer.
//!
//! ## Usage
//!
//! Platform glue converts key and IME events into [`InputEvent`]s and passes
//! them to [`ChipsView::handle_input`](crate::ChipsView::handle_input).
//! [`intercept`] decides whether an event is a chip backspace or an ordinary
//! text edit. Input methods that report backspace as "delete one character
//! before the cursor" are folded into the same path as the hardware key.

/// Keys the chips control distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character after the cursor.
    Delete,
    /// Any other key, identified by its platform key code.
    Other(u32),
}

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key pressed.
    Down,
    /// Key released.
    Up,
}

/// An input signal addressed to the text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A raw key event.
    Key {
        /// The key.
        code: KeyCode,
        /// Press or release.
        action: KeyAction,
    },
    /// An input-method request to delete characters around the cursor.
    DeleteSurroundingText {
        /// Characters to delete before the cursor.
        before: usize,
        /// Characters to delete after the cursor.
        after: usize,
    },
    /// An input-method commit of composed text.
    CommitText(String),
}

impl InputEvent {
    /// A backspace key press.
    pub const BACKSPACE_DOWN: Self = InputEvent::Key {
        code: KeyCode::Backspace,
        action: KeyAction::Down,
    };

    /// A backspace key release.
    pub const BACKSPACE_UP: Self = InputEvent::Key {
        code: KeyCode::Backspace,
        action: KeyAction::Up,
    };
}

/// Whether the chips control consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// The event acted on the chips and must not reach the editor.
    Consumed,
    /// The event was handled as ordinary text input.
    PassedThrough,
}

/// An edit to apply to the text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Insert at the cursor.
    Insert(String),
    /// Delete graphemes before and after the cursor.
    Delete {
        /// Graphemes before the cursor.
        before: usize,
        /// Graphemes after the cursor.
        after: usize,
    },
}

/// Classification of an [`InputEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intercepted {
    /// A backspace on empty text; routed to the selection controller.
    ChipBackspace,
    /// An ordinary edit for the text buffer.
    Edit(TextEdit),
    /// Nothing to do.
    Unhandled,
}

/// Classifies `event` given whether the text field is currently empty.
///
/// ```
/// use chipsview::input::{InputEvent, Intercepted, TextEdit, intercept};
///
/// assert_eq!(intercept(&InputEvent::BACKSPACE_DOWN, true), Intercepted::ChipBackspace);
/// assert_eq!(
///     intercept(&InputEvent::BACKSPACE_DOWN, false),
///     Intercepted::Edit(TextEdit::Delete { before: 1, after: 0 })
/// );
/// ```
pub fn intercept(event: &InputEvent, text_is_empty: bool) -> Intercepted {
    match event {
        InputEvent::Key {
            code: KeyCode::Backspace,
            action: KeyAction::Down,
        } if text_is_empty => Intercepted::ChipBackspace,
        InputEvent::Key {
            code: KeyCode::Backspace,
            action: KeyAction::Down,
        } => Intercepted::Edit(TextEdit::Delete {
            before: 1,
            after: 0,
        }),
        InputEvent::Key {
            code: KeyCode::Delete,
            action: KeyAction::Down,
        } => Intercepted::Edit(TextEdit::Delete {
            before: 0,
            after: 1,
        }),
        InputEvent::Key { .. } => Intercepted::Unhandled,
        // Some input methods send this instead of a backspace key event.
        InputEvent::DeleteSurroundingText {
            before: 1,
            after: 0,
        } if text_is_empty => intercept(&InputEvent::BACKSPACE_DOWN, true),
        InputEvent::DeleteSurroundingText { before, after } => {
            Intercepted::Edit(TextEdit::Delete {
                before: *before,
                after: *after,
            })
        }
        InputEvent::CommitText(text) if text.is_empty() => Intercepted::Unhandled,
        InputEvent::CommitText(text) => Intercepted::Edit(TextEdit::Insert(text.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backspace_release_is_never_a_chip_action() {
        assert_eq!(intercept(&InputEvent::BACKSPACE_UP, true), Intercepted::Unhandled);
        assert_eq!(intercept(&InputEvent::BACKSPACE_UP, false), Intercepted::Unhandled);
    }

    #[test]
    fn ime_single_delete_on_empty_text_is_backspace() {
        let event = InputEvent::DeleteSurroundingText {
            before: 1,
            after: 0,
        };
        assert_eq!(intercept(&event, true), Intercepted::ChipBackspace);
        assert_eq!(
            intercept(&event, false),
            Intercepted::Edit(TextEdit::Delete {
                before: 1,
                after: 0,
            })
        );
    }

    #[test]
    fn ime_wider_delete_passes_through() {
        let event = InputEvent::DeleteSurroundingText {
            before: 2,
            after: 1,
        };
        assert_eq!(
            intercept(&event, true),
            Intercepted::Edit(TextEdit::Delete {
                before: 2,
                after: 1,
            })
        );
    }

    #[test]
    fn forward_delete_on_empty_text_is_not_a_chip_action() {
        let event = InputEvent::Key {
            code: KeyCode::Delete,
            action: KeyAction::Down,
        };
        assert_eq!(
            intercept(&event, true),
            Intercepted::Edit(TextEdit::Delete {
                before: 0,
                after: 1,
            })
        );
    }

    #[test]
    fn commit_text_inserts() {
        assert_eq!(
            intercept(&InputEvent::CommitText("al".to_owned()), true),
            Intercepted::Edit(TextEdit::Insert("al".to_owned()))
        );
        assert_eq!(
            intercept(&InputEvent::CommitText(String::new()), true),
            Intercepted::Unhandled
        );
    }

    #[test]
    fn other_keys_are_unhandled() {
        let event = InputEvent::Key {
            code: KeyCode::Other(66),
            action: KeyAction::Down,
        };
        assert_eq!(intercept(&event, true), Intercepted::Unhandled);
    }
}
