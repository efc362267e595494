//! The chip entity: one caller-supplied item shown as a removable token.
//!
//! ## Usage
//!
//! Chips are created by the collection when the application adds an item.
//! Applications read them back through [`ChipsView::rows`](crate::ChipsView::rows)
//! or [`ChipCollection::values`](crate::ChipCollection::values).
use unicode_segmentation::UnicodeSegmentation;

/// Default label length, in user-perceived characters, before truncation.
pub const MAX_LABEL_LENGTH: usize = 30;

/// Marker appended to truncated labels.
pub const ELLIPSIS: &str = "...";

/// Capability every chip payload must provide: a human-readable string used
/// as the label when the caller does not supply one.
///
/// ```
/// use chipsview::ChipData;
///
/// struct Contact {
///     name: String,
/// }
///
/// impl ChipData for Contact {
///     fn display_string(&self) -> String {
///         self.name.clone()
///     }
/// }
/// ```
pub trait ChipData {
    /// Returns the text shown on the chip.
    fn display_string(&self) -> String;
}

impl ChipData for String {
    fn display_string(&self) -> String {
        self.clone()
    }
}

impl ChipData for &str {
    fn display_string(&self) -> String {
        (*self).to_owned()
    }
}

/// A single token in a chips control.
///
/// Identity (`key`), payload, label and the indelible flag are fixed at
/// construction. The selection flag is the only mutable state and is owned by
/// the selection controller.
///
/// Two chips compare equal when their keys are equal, which is the same axis
/// the collection deduplicates on.
#[derive(Debug, Clone)]
pub struct Chip<K, V> {
    key: K,
    data: V,
    label: String,
    avatar: Option<String>,
    indelible: bool,
    selected: bool,
}

impl<K, V: ChipData> Chip<K, V> {
    /// Creates a chip, deriving the label from `data` when `label` is `None`.
    ///
    /// Labels longer than [`MAX_LABEL_LENGTH`] characters are cut and
    /// suffixed with [`ELLIPSIS`].
    ///
    /// ```
    /// use chipsview::Chip;
    ///
    /// let chip = Chip::new(None, "Ada Lovelace".to_owned(), 7u32, false);
    /// assert_eq!(chip.label(), "Ada Lovelace");
    ///
    /// let long = "x".repeat(45);
    /// let chip = Chip::new(Some(long), "payload".to_owned(), 8u32, false);
    /// assert_eq!(chip.label(), format!("{}...", "x".repeat(30)));
    /// ```
    pub fn new(label: Option<String>, data: V, key: K, indelible: bool) -> Self {
        Self::with_label_limit(label, data, key, indelible, MAX_LABEL_LENGTH)
    }

    /// Same as [`new`](Self::new) with a custom truncation limit.
    pub fn with_label_limit(
        label: Option<String>,
        data: V,
        key: K,
        indelible: bool,
        max_label_len: usize,
    ) -> Self {
        let label = label.unwrap_or_else(|| data.display_string());
        Self {
            key,
            data,
            label: truncate_label(label, max_label_len),
            avatar: None,
            indelible,
            selected: false,
        }
    }
}

impl<K, V> Chip<K, V> {
    /// Attaches an avatar image URI for the rendering collaborator.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// The unique key of this chip.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The caller payload.
    pub fn data(&self) -> &V {
        &self.data
    }

    /// The (possibly truncated) display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The avatar URI, if any. Loading it is up to the renderer; a failed
    /// load only affects the glyph.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Whether this chip refuses selection and therefore deletion.
    pub fn is_indelible(&self) -> bool {
        self.indelible
    }

    /// Whether user interaction can delete this chip.
    pub fn is_deletable(&self) -> bool {
        !self.indelible
    }

    /// Whether this chip is currently selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Sets the selection flag. Ignored for indelible chips.
    pub(crate) fn set_selected(&mut self, selected: bool) {
        if self.indelible {
            return;
        }
        self.selected = selected;
    }
}

impl<K: PartialEq, V> PartialEq for Chip<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Chip<K, V> {}

/// Cuts `label` to `max_len` grapheme clusters, appending [`ELLIPSIS`] if
/// anything was removed.
pub fn truncate_label(label: String, max_len: usize) -> String {
    match label.grapheme_indices(true).nth(max_len) {
        Some((cut, _)) => {
            let mut truncated = label[..cut].to_owned();
            truncated.push_str(ELLIPSIS);
            truncated
        }
        None => label,
    }
}
