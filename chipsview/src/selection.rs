//! Selection state machine shared by chip taps and backspace.
//!
//! ## States
//!
//! - [`SelectionState::Idle`]: no chip is selected.
//! - [`SelectionState::OneSelected`]: exactly one chip, tracked by key, is
//!   selected.
//!
//! Tapping a chip selects it, unselecting any other chip first. Tapping the
//! selected chip again deletes it. A backspace on empty text acts as a tap on
//! the selected chip, or on the last chip when nothing is selected. Focusing
//! the text field or tapping the container returns to `Idle`.
//!
//! Indelible chips refuse selection at the entity level, so they can never
//! reach the deleting transition; the controller has no special case for
//! them.
use std::hash::Hash;

use tracing::debug;

use crate::{chip::Chip, collection::ChipCollection};

/// Current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState<K> {
    /// Nothing selected.
    Idle,
    /// The chip with this key is selected.
    OneSelected(K),
}

impl<K> Default for SelectionState<K> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Result of feeding an event to the [`SelectionController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction<K, V> {
    /// The chip with this key is now selected.
    Selected(K),
    /// The chip was removed from the collection.
    Deleted(Chip<K, V>),
    /// The chip refused selection because it is indelible; nothing is
    /// selected now.
    Refused(K),
    /// A previously selected chip was unselected.
    Unselected,
    /// The event had no effect on the chips.
    Ignored,
}

impl<K, V> Interaction<K, V> {
    /// Whether chip state changed and the chips need to be redrawn.
    pub fn changed_chips(&self) -> bool {
        !matches!(self, Interaction::Ignored)
    }
}

/// The IDLE / ONE_SELECTED state machine.
#[derive(Debug, Clone)]
pub struct SelectionController<K> {
    state: SelectionState<K>,
}

impl<K> Default for SelectionController<K> {
    fn default() -> Self {
        Self {
            state: SelectionState::Idle,
        }
    }
}

impl<K: Hash + Eq + Clone + std::fmt::Debug> SelectionController<K> {
    /// Creates a controller in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> &SelectionState<K> {
        &self.state
    }

    /// Key of the selected chip, if any.
    pub fn selected(&self) -> Option<&K> {
        match &self.state {
            SelectionState::OneSelected(key) => Some(key),
            SelectionState::Idle => None,
        }
    }

    /// Handles a tap on the chip stored under `key`.
    pub fn tap<V>(&mut self, chips: &mut ChipCollection<K, V>, key: &K) -> Interaction<K, V> {
        if !chips.contains_key(key) {
            return Interaction::Ignored;
        }

        unselect_except(chips, Some(key));

        if self.selected() == Some(key) {
            self.state = SelectionState::Idle;
            return match chips.remove(key) {
                Some(chip) => {
                    debug!("chip {key:?} deleted by second interaction");
                    Interaction::Deleted(chip)
                }
                None => Interaction::Ignored,
            };
        }

        let Some(chip) = chips.get_mut(key) else {
            return Interaction::Ignored;
        };
        chip.set_selected(true);
        if chip.is_selected() {
            debug!("chip {key:?} selected");
            self.state = SelectionState::OneSelected(key.clone());
            Interaction::Selected(key.clone())
        } else {
            debug!("chip {key:?} refused selection");
            self.state = SelectionState::Idle;
            Interaction::Refused(key.clone())
        }
    }

    /// Handles a backspace signal.
    ///
    /// With text in the field the signal belongs to the text editor and is
    /// ignored. On empty text it taps the selected chip, or the last chip when
    /// nothing is selected.
    pub fn backspace<V>(
        &mut self,
        chips: &mut ChipCollection<K, V>,
        text_is_empty: bool,
    ) -> Interaction<K, V> {
        if !text_is_empty {
            return Interaction::Ignored;
        }
        self.sync(chips);
        let target = match &self.state {
            SelectionState::OneSelected(key) => Some(key.clone()),
            SelectionState::Idle => chips.last().map(|chip| chip.key().clone()),
        };
        match target {
            Some(key) => self.tap(chips, &key),
            None => Interaction::Ignored,
        }
    }

    /// Unselects every chip. Used when the text field gains focus or the
    /// container itself is tapped.
    pub fn clear<V>(&mut self, chips: &mut ChipCollection<K, V>) -> Interaction<K, V> {
        let was_selected = std::mem::take(&mut self.state) != SelectionState::Idle;
        unselect_except(chips, None);
        if was_selected {
            debug!("selection cleared");
            Interaction::Unselected
        } else {
            Interaction::Ignored
        }
    }

    /// Falls back to `Idle` when the selected chip left the collection by
    /// other means. Returns `true` if the state changed.
    pub fn sync<V>(&mut self, chips: &ChipCollection<K, V>) -> bool {
        let stale = self
            .selected()
            .is_some_and(|key| !chips.contains_key(key));
        if stale {
            self.state = SelectionState::Idle;
        }
        stale
    }
}

fn unselect_except<K: PartialEq, V>(chips: &mut ChipCollection<K, V>, keep: Option<&K>) {
    for chip in chips.values_mut() {
        if Some(chip.key()) != keep {
            chip.set_selected(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(entries: &[(u32, bool)]) -> ChipCollection<u32, String> {
        let mut chips = ChipCollection::new();
        for &(key, indelible) in entries {
            chips.add(Chip::new(None, format!("chip-{key}"), key, indelible));
        }
        chips
    }

    fn selected_keys(chips: &ChipCollection<u32, String>) -> Vec<u32> {
        chips
            .values()
            .filter(|chip| chip.is_selected())
            .map(|chip| *chip.key())
            .collect()
    }

    #[test]
    fn tap_selects_then_deletes() {
        let mut chips = collection(&[(1, false), (2, false)]);
        let mut controller = SelectionController::new();

        assert_eq!(controller.tap(&mut chips, &1), Interaction::Selected(1));
        assert_eq!(controller.state(), &SelectionState::OneSelected(1));
        assert_eq!(selected_keys(&chips), [1]);

        match controller.tap(&mut chips, &1) {
            Interaction::Deleted(chip) => assert_eq!(*chip.key(), 1),
            other => panic!("expected deletion, got {other:?}"),
        }
        assert_eq!(controller.state(), &SelectionState::Idle);
        assert!(!chips.contains_key(&1));
    }

    #[test]
    fn selecting_another_chip_unselects_the_first() {
        let mut chips = collection(&[(1, false), (2, false), (3, false)]);
        let mut controller = SelectionController::new();

        controller.tap(&mut chips, &1);
        assert_eq!(controller.tap(&mut chips, &3), Interaction::Selected(3));
        assert_eq!(selected_keys(&chips), [3]);
        assert_eq!(chips.len(), 3);
    }

    #[test]
    fn at_most_one_chip_is_ever_selected() {
        let mut chips = collection(&[(1, false), (2, true), (3, false), (4, false)]);
        let mut controller = SelectionController::new();
        let script: [Option<u32>; 12] = [
            Some(1),
            Some(3),
            None,
            Some(2),
            Some(4),
            Some(4),
            None,
            Some(1),
            None,
            Some(3),
            Some(1),
            None,
        ];

        for step in script {
            match step {
                Some(key) => {
                    controller.tap(&mut chips, &key);
                }
                None => {
                    controller.backspace(&mut chips, true);
                }
            }
            let selected = selected_keys(&chips);
            assert!(selected.len() <= 1, "multiple selected: {selected:?}");
            assert_eq!(selected.first(), controller.selected());
        }
    }

    #[test]
    fn two_backspaces_delete_the_last_chip() {
        let mut chips = collection(&[(1, false), (2, false)]);
        let mut controller = SelectionController::new();

        assert_eq!(controller.backspace(&mut chips, true), Interaction::Selected(2));
        assert_eq!(chips.len(), 2);

        assert!(matches!(
            controller.backspace(&mut chips, true),
            Interaction::Deleted(ref chip) if *chip.key() == 2
        ));
        assert_eq!(controller.state(), &SelectionState::Idle);
        assert_eq!(chips.len(), 1);
    }

    #[test]
    fn backspace_with_text_is_ignored() {
        let mut chips = collection(&[(1, false)]);
        let mut controller = SelectionController::new();

        assert_eq!(controller.backspace(&mut chips, false), Interaction::Ignored);
        assert_eq!(controller.state(), &SelectionState::Idle);
        assert!(selected_keys(&chips).is_empty());
    }

    #[test]
    fn backspace_on_empty_collection_is_ignored() {
        let mut chips = collection(&[]);
        let mut controller = SelectionController::new();
        assert_eq!(controller.backspace(&mut chips, true), Interaction::Ignored);
    }

    #[test]
    fn backspace_deletes_tapped_chip_even_if_not_last() {
        let mut chips = collection(&[(1, false), (2, false), (3, false)]);
        let mut controller = SelectionController::new();

        controller.tap(&mut chips, &1);
        let interaction = controller.backspace(&mut chips, true);
        assert!(matches!(interaction, Interaction::Deleted(ref chip) if *chip.key() == 1));
        assert_eq!(chips.values().map(|chip| *chip.key()).collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn indelible_chip_survives_double_tap() {
        let mut chips = collection(&[(1, false), (2, true)]);
        let mut controller = SelectionController::new();

        assert_eq!(controller.tap(&mut chips, &2), Interaction::Refused(2));
        assert_eq!(controller.tap(&mut chips, &2), Interaction::Refused(2));
        assert!(chips.contains_key(&2));
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn indelible_chip_survives_double_backspace() {
        let mut chips = collection(&[(1, false), (2, true)]);
        let mut controller = SelectionController::new();

        assert_eq!(controller.backspace(&mut chips, true), Interaction::Refused(2));
        assert_eq!(controller.backspace(&mut chips, true), Interaction::Refused(2));
        assert_eq!(chips.len(), 2);
    }

    #[test]
    fn tapping_indelible_chip_drops_previous_selection() {
        let mut chips = collection(&[(1, false), (2, true)]);
        let mut controller = SelectionController::new();

        controller.tap(&mut chips, &1);
        controller.tap(&mut chips, &2);
        assert!(selected_keys(&chips).is_empty());
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut chips = collection(&[(1, false)]);
        let mut controller = SelectionController::new();

        controller.tap(&mut chips, &1);
        assert_eq!(controller.clear(&mut chips), Interaction::Unselected);
        assert!(selected_keys(&chips).is_empty());
        assert_eq!(controller.clear(&mut chips), Interaction::Ignored);
    }

    #[test]
    fn sync_forgets_removed_selection() {
        let mut chips = collection(&[(1, false), (2, false)]);
        let mut controller = SelectionController::new();

        controller.tap(&mut chips, &2);
        chips.remove(&2);
        assert!(controller.sync(&chips));
        assert_eq!(controller.state(), &SelectionState::Idle);

        // The next backspace selects the new last chip instead of deleting.
        assert_eq!(controller.backspace(&mut chips, true), Interaction::Selected(1));
    }

    #[test]
    fn tap_on_unknown_key_is_ignored() {
        let mut chips = collection(&[(1, false)]);
        let mut controller = SelectionController::new();
        controller.tap(&mut chips, &1);
        assert_eq!(controller.tap(&mut chips, &9), Interaction::Ignored);
        assert_eq!(controller.selected(), Some(&1));
    }
}
