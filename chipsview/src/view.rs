//! The chips control as seen by application code.
//!
//! ## Usage
//!
//! Create a [`ChipsView`] with a [`ChipsConfig`] and a [`ChipMeasurer`], add
//! chips as the user picks items, forward input events and taps, and call
//! [`ChipsView::on_frame`] after every host layout pass. Render from
//! [`ChipsView::rows`], [`ChipsView::layout`] and [`ChipsView::text_buffer`].
//!
//! ```
//! use chipsview::{ChipsConfig, ChipsView, InputEvent, measure::MonospaceMeasurer, px::Px};
//!
//! let measurer = MonospaceMeasurer::new(Px(1), Px(2), Px(1)).with_container_width(Px(20));
//! let mut view = ChipsView::new(ChipsConfig::default(), measurer).expect("valid config");
//!
//! view.add_chip(None, None, 1u32, "ada".to_owned());
//! view.add_chip(None, None, 2u32, "grace".to_owned());
//! view.add_chip(None, None, 3u32, "linus".to_owned());
//! assert_eq!(view.rows().len(), 2);
//!
//! // First backspace selects the last chip, the second one deletes it.
//! view.handle_input(&InputEvent::BACKSPACE_DOWN);
//! view.handle_input(&InputEvent::BACKSPACE_DOWN);
//! assert_eq!(view.chips().len(), 2);
//! ```
use std::{
    collections::HashSet,
    fmt::Debug,
    hash::{BuildHasher, Hash},
};

use tracing::debug;

use crate::{
    chip::{Chip, ChipData},
    collection::ChipCollection,
    config::{ChipMetrics, ChipsConfig, ConfigError},
    flow_layout::{FlowLayout, LayoutNotReady, RowPartition},
    input::{InputDisposition, InputEvent, Intercepted, TextEdit, intercept},
    listener::{Listener, Listeners},
    margin::apply_text_margin,
    measure::ChipMeasurer,
    px::Px,
    relayout::RelayoutQueue,
    selection::{Interaction, SelectionController, SelectionState},
    text_buffer::{LeadingMargin, TextBuffer},
};

/// Geometry of the last completed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipsLayout {
    partition: RowPartition,
    container_width: Px,
    text_margin: LeadingMargin,
    text_top: Px,
    text_left: Px,
    chip_height: Px,
    content_height: Px,
    viewport_height: Px,
}

impl ChipsLayout {
    /// Chip indices per row.
    pub fn partition(&self) -> &RowPartition {
        &self.partition
    }

    /// Number of rows, including the row the text field sits on.
    pub fn row_count(&self) -> usize {
        self.partition.row_count()
    }

    /// Container width the layout was computed for.
    pub fn container_width(&self) -> Px {
        self.container_width
    }

    /// Margin applied to the first line of the text field.
    pub fn text_margin(&self) -> LeadingMargin {
        self.text_margin
    }

    /// Top edge of the text field, which shares the last row.
    pub fn text_top(&self) -> Px {
        self.text_top
    }

    /// Left edge of the text field box. The leading margin indents its first
    /// line further.
    pub fn text_left(&self) -> Px {
        self.text_left
    }

    /// Height of a single chip; rows are this plus the vertical spacing.
    pub fn chip_height(&self) -> Px {
        self.chip_height
    }

    /// Total height of all rows plus top padding.
    pub fn content_height(&self) -> Px {
        self.content_height
    }

    /// Visible height: the content height, clamped to the configured maximum.
    pub fn viewport_height(&self) -> Px {
        self.viewport_height
    }

    /// Scroll offset that shows the last row.
    pub fn bottom_scroll_offset(&self) -> Px {
        (self.content_height - self.viewport_height).positive()
    }
}

/// A text field preceded by wrapping, selectable chips.
pub struct ChipsView<K, V, M> {
    config: ChipsConfig,
    metrics: ChipMetrics,
    flow: FlowLayout,
    chips: ChipCollection<K, V>,
    selection: SelectionController<K>,
    text: TextBuffer,
    text_focused: bool,
    relayout: RelayoutQueue,
    layout: Option<ChipsLayout>,
    scroll_to_bottom: bool,
    listeners: Listeners<V>,
    measurer: M,
}

impl<K, V, M> ChipsView<K, V, M>
where
    K: Hash + Eq + Clone + Debug,
    V: ChipData,
    M: ChipMeasurer<K, V>,
{
    /// Creates an empty control.
    ///
    /// A first layout is attempted right away; if the container is not
    /// measured yet it is deferred to [`on_frame`](Self::on_frame).
    pub fn new(config: ChipsConfig, measurer: M) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut view = Self {
            metrics: config.metrics(),
            flow: FlowLayout::new(config.reserve_fraction),
            relayout: RelayoutQueue::new(config.relayout_warn_after),
            config,
            chips: ChipCollection::new(),
            selection: SelectionController::new(),
            text: TextBuffer::new(),
            text_focused: false,
            layout: None,
            scroll_to_bottom: false,
            listeners: Listeners::default(),
            measurer,
        };
        view.request_layout(false);
        Ok(view)
    }

    /// Adds a chip and clears the typed text, as when the user picks a
    /// suggestion for the current query.
    ///
    /// Returns `false` without side effects if `key` is already present.
    pub fn add_chip(
        &mut self,
        label: Option<String>,
        avatar: Option<String>,
        key: K,
        data: V,
    ) -> bool {
        if !self.add_chip_with(label, avatar, key, data, false) {
            return false;
        }
        self.set_text("");
        true
    }

    /// Adds a chip, optionally indelible, leaving the typed text alone.
    ///
    /// Fires the chip-added listener and relayouts with the cursor moved to
    /// the end of the text. Returns `false` without side effects if `key` is
    /// already present.
    pub fn add_chip_with(
        &mut self,
        label: Option<String>,
        avatar: Option<String>,
        key: K,
        data: V,
        indelible: bool,
    ) -> bool {
        if self.chips.contains_key(&key) {
            debug!("chip {key:?} already present; add ignored");
            return false;
        }

        let mut chip =
            Chip::with_label_limit(label, data, key, indelible, self.config.max_label_len);
        if let Some(avatar) = avatar {
            chip = chip.with_avatar(avatar);
        }
        self.chips.add(chip);
        if let Some(chip) = self.chips.last() {
            debug!("chip {:?} added", chip.key());
            self.listeners.chip_added(chip.data());
        }

        self.request_layout(true);
        self.scroll_to_bottom = true;
        true
    }

    /// Removes the chip stored under `key`, firing the chip-deleted listener.
    ///
    /// Programmatic removal is not subject to the indelible flag, which only
    /// guards user interaction.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(chip) = self.chips.remove(key) else {
            return false;
        };
        self.selection.sync(&self.chips);
        self.listeners.chip_deleted(chip.data());
        self.request_layout(true);
        true
    }

    /// Removes every chip whose key is not in `valid_keys`.
    ///
    /// No per-chip notification fires. Returns `true` if anything was removed.
    pub fn prune<S: BuildHasher>(&mut self, valid_keys: &HashSet<K, S>) -> bool {
        let removed = self.chips.prune(valid_keys);
        if removed == 0 {
            return false;
        }
        debug!("pruned {removed} chips");
        self.selection.sync(&self.chips);
        self.request_layout(true);
        true
    }

    /// Removes every chip without notifications.
    pub fn clear(&mut self) {
        let removed = self.chips.clear();
        debug!("cleared {removed} chips");
        self.selection.sync(&self.chips);
        self.request_layout(true);
    }

    /// Handles a tap on a chip: select it, or delete it if it was already
    /// selected. The text field loses focus unless `key` is unknown.
    pub fn tap_chip(&mut self, key: &K) -> Interaction<K, V> {
        let interaction = self.selection.tap(&mut self.chips, key);
        if interaction.changed_chips() {
            self.text_focused = false;
        }
        self.after_interaction(&interaction);
        interaction
    }

    /// Handles a tap on the container outside any chip: focus the text field
    /// and unselect all chips.
    pub fn tap_container(&mut self) -> Interaction<K, V> {
        self.set_text_focus(true)
    }

    /// Reports a focus change of the text field. Gaining focus unselects all
    /// chips.
    pub fn set_text_focus(&mut self, focused: bool) -> Interaction<K, V> {
        self.text_focused = focused;
        if !focused {
            return Interaction::Ignored;
        }
        let interaction = self.selection.clear(&mut self.chips);
        self.after_interaction(&interaction);
        interaction
    }

    /// Whether the text field has focus.
    pub fn text_focused(&self) -> bool {
        self.text_focused
    }

    /// Routes an input event either to the chips or to the text buffer.
    pub fn handle_input(&mut self, event: &InputEvent) -> InputDisposition {
        match intercept(event, self.text.is_empty()) {
            Intercepted::ChipBackspace => {
                let interaction = self.selection.backspace(&mut self.chips, true);
                self.after_interaction(&interaction);
                InputDisposition::Consumed
            }
            Intercepted::Edit(edit) => {
                let changed = match edit {
                    TextEdit::Insert(text) => self.text.insert(&text),
                    TextEdit::Delete { before, after } => {
                        let deleted_before = self.text.delete_backward(before);
                        let deleted_after = self.text.delete_forward(after);
                        deleted_before || deleted_after
                    }
                };
                if changed {
                    self.listeners.text_changed(self.text.text());
                }
                InputDisposition::PassedThrough
            }
            Intercepted::Unhandled => InputDisposition::PassedThrough,
        }
    }

    /// Replaces the typed text, firing the text-changed listener if it
    /// differs.
    pub fn set_text(&mut self, text: &str) {
        if self.text.set_text(text) {
            self.listeners.text_changed(self.text.text());
        }
    }

    /// The typed text.
    pub fn text(&self) -> &str {
        self.text.text()
    }

    /// The text model, including cursor and leading margin.
    pub fn text_buffer(&self) -> &TextBuffer {
        &self.text
    }

    /// Moves the text cursor, e.g. after the user tapped inside the text.
    ///
    /// The offset snaps back to the nearest grapheme boundary. Adding or
    /// deleting a chip moves the cursor to the end again.
    pub fn set_cursor(&mut self, offset: usize) {
        self.text.set_cursor(offset);
    }

    /// Runs a relayout that was deferred because the container had no width.
    ///
    /// Call after every host layout pass. Returns `true` if a layout was
    /// applied.
    pub fn on_frame(&mut self) -> bool {
        self.relayout.is_pending() && self.flush_layout()
    }

    /// Recomputes rows, e.g. after the container was resized.
    pub fn invalidate_layout(&mut self) {
        self.request_layout(false);
    }

    /// Whether a relayout is waiting for the container width.
    pub fn layout_pending(&self) -> bool {
        self.relayout.is_pending()
    }

    /// The last completed layout, or `None` while waiting for a width.
    pub fn layout(&self) -> Option<&ChipsLayout> {
        self.layout.as_ref()
    }

    /// Chips grouped into rows, top to bottom. Empty while no layout is
    /// available.
    pub fn rows(&self) -> Vec<Vec<&Chip<K, V>>> {
        let Some(layout) = &self.layout else {
            return Vec::new();
        };
        layout
            .partition
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|&index| self.chips.get_index(index))
                    .collect()
            })
            .collect()
    }

    /// Returns `true` once after a chip was added, telling the host to scroll
    /// the viewport to the last row.
    pub fn take_scroll_to_bottom(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }

    /// The chips in insertion order.
    pub fn chips(&self) -> &ChipCollection<K, V> {
        &self.chips
    }

    /// The selection state.
    pub fn selection(&self) -> &SelectionState<K> {
        self.selection.state()
    }

    /// The selected chip, if any.
    pub fn selected_chip(&self) -> Option<&Chip<K, V>> {
        self.selection.selected().and_then(|key| self.chips.get(key))
    }

    /// The configuration the control was built with.
    pub fn config(&self) -> &ChipsConfig {
        &self.config
    }

    /// Pixel metrics derived from the configuration.
    pub fn metrics(&self) -> ChipMetrics {
        self.metrics
    }

    /// The measurement collaborator.
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Mutable access to the measurement collaborator, e.g. to report a new
    /// container width. Follow up with [`invalidate_layout`](Self::invalidate_layout)
    /// or [`on_frame`](Self::on_frame).
    pub fn measurer_mut(&mut self) -> &mut M {
        &mut self.measurer
    }

    /// Registers the listener fired after a chip was added.
    pub fn set_chip_added_listener<F>(&mut self, listener: F)
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.listeners.chip_added = Some(Listener::new(listener));
    }

    /// Registers the listener fired after a chip was removed by interaction
    /// or [`remove`](Self::remove).
    pub fn set_chip_deleted_listener<F>(&mut self, listener: F)
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.listeners.chip_deleted = Some(Listener::new(listener));
    }

    /// Registers the listener fired after the typed text changed.
    pub fn set_text_changed_listener<F>(&mut self, listener: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.listeners.text_changed = Some(Listener::new(listener));
    }

    fn after_interaction(&mut self, interaction: &Interaction<K, V>) {
        match interaction {
            Interaction::Deleted(chip) => {
                self.listeners.chip_deleted(chip.data());
                self.request_layout(true);
            }
            Interaction::Ignored => {}
            Interaction::Selected(_) | Interaction::Refused(_) | Interaction::Unselected => {
                self.request_layout(false);
            }
        }
    }

    fn request_layout(&mut self, move_cursor: bool) {
        self.relayout.request(move_cursor);
        self.flush_layout();
    }

    fn flush_layout(&mut self) -> bool {
        let Some(request) = self.relayout.take() else {
            return false;
        };

        let width = self.measurer.container_width();
        let widths = self
            .chips
            .values()
            .map(|chip| self.measurer.chip_width(chip));
        let partition = match self.flow.partition(width, widths) {
            Ok(partition) => partition,
            Err(LayoutNotReady) => {
                self.layout = None;
                self.relayout.defer(request);
                return false;
            }
        };
        self.relayout.complete();

        let text_margin = apply_text_margin(&mut self.text, &partition);
        if request.move_cursor {
            self.text.move_cursor_to_end();
        }

        let rows = i32::try_from(partition.row_count()).unwrap_or(i32::MAX);
        let text_top = self.metrics.spacing_top + self.metrics.row_height * (rows - 1);
        let content_height = self.metrics.spacing_top + self.metrics.row_height * rows;
        let viewport_height = self
            .metrics
            .max_height
            .map_or(content_height, |max| content_height.min(max));
        debug!(
            "laid out {} chips in {rows} rows at {width}, text margin {}",
            self.chips.len(),
            text_margin.first_line
        );

        self.layout = Some(ChipsLayout {
            partition,
            container_width: width,
            text_margin,
            text_top,
            text_left: self.metrics.text_leading_margin,
            chip_height: self.metrics.chip_height,
            content_height,
            viewport_height,
        });
        true
    }
}
