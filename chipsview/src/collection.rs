//! Ordered, key-deduplicated chip storage.
//!
//! ## Usage
//!
//! [`ChipCollection`] is owned by [`ChipsView`](crate::ChipsView), which turns
//! the return values of its mutators into notifications and relayouts. The
//! collection itself has no side effects.
use std::{
    collections::HashSet,
    hash::{BuildHasher, Hash},
};

use indexmap::{IndexMap, map};
use rustc_hash::FxBuildHasher;

use crate::chip::Chip;

/// Insertion-ordered mapping from chip key to [`Chip`].
///
/// At most one chip exists per key. Removal keeps the relative order of the
/// remaining chips.
///
/// ```
/// use chipsview::{Chip, ChipCollection};
///
/// let mut chips = ChipCollection::new();
/// assert!(chips.add(Chip::new(None, "a".to_owned(), 1u32, false)));
/// assert!(chips.add(Chip::new(None, "b".to_owned(), 2u32, false)));
/// assert!(!chips.add(Chip::new(None, "again".to_owned(), 1u32, false)));
///
/// let labels: Vec<_> = chips.values().map(|chip| chip.label()).collect();
/// assert_eq!(labels, ["a", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct ChipCollection<K, V> {
    entries: IndexMap<K, Chip<K, V>, FxBuildHasher>,
}

impl<K, V> Default for ChipCollection<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::with_hasher(FxBuildHasher),
        }
    }
}

impl<K, V> ChipCollection<K, V> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chips.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no chips.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the chips in insertion order.
    ///
    /// Every call starts a fresh iteration over the current contents.
    pub fn values(&self) -> map::Values<'_, K, Chip<K, V>> {
        self.entries.values()
    }

    pub(crate) fn values_mut(&mut self) -> map::ValuesMut<'_, K, Chip<K, V>> {
        self.entries.values_mut()
    }

    /// The most recently inserted chip still present.
    pub fn last(&self) -> Option<&Chip<K, V>> {
        self.entries.last().map(|(_, chip)| chip)
    }

    /// The chip at `index` in insertion order.
    pub fn get_index(&self, index: usize) -> Option<&Chip<K, V>> {
        self.entries.get_index(index).map(|(_, chip)| chip)
    }

    /// Removes every chip and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }
}

impl<K: Hash + Eq + Clone, V> ChipCollection<K, V> {
    /// Appends `chip` unless its key is already present.
    ///
    /// Returns `false` and leaves the collection untouched for a duplicate key.
    pub fn add(&mut self, chip: Chip<K, V>) -> bool {
        match self.entries.entry(chip.key().clone()) {
            map::Entry::Occupied(_) => false,
            map::Entry::Vacant(slot) => {
                slot.insert(chip);
                true
            }
        }
    }

    /// Removes the chip stored under `key`.
    pub fn remove(&mut self, key: &K) -> Option<Chip<K, V>> {
        self.entries.shift_remove(key)
    }

    /// Removes every chip whose key is not in `valid_keys` and returns how
    /// many were removed.
    pub fn prune<S: BuildHasher>(&mut self, valid_keys: &HashSet<K, S>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| valid_keys.contains(key));
        before - self.entries.len()
    }

    /// Whether a chip with `key` exists.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Looks up a chip by key.
    pub fn get(&self, key: &K) -> Option<&Chip<K, V>> {
        self.entries.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut Chip<K, V>> {
        self.entries.get_mut(key)
    }

    /// Position of `key` in insertion order.
    pub fn get_index_of(&self, key: &K) -> Option<usize> {
        self.entries.get_index_of(key)
    }
}
