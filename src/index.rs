//! Per-sub-key slot index.

use std::collections::HashMap;
use std::hash::Hash;

/// Maps each sub-key value to the arena slots of the live entries that
/// carry it, in insertion order.
///
/// A sub-key stays present after its last entry is removed: "never
/// inserted" (no list) and "currently empty" (empty list) are distinct
/// answers for lookups.
pub(crate) struct SubKeyIndex<K> {
    slots: HashMap<K, Vec<usize>>,
}

impl<K> SubKeyIndex<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<K: Eq + Hash> SubKeyIndex<K> {
    /// Slot list for `key`, or `None` if the sub-key was never inserted.
    #[inline]
    pub(crate) fn get(&self, key: &K) -> Option<&[usize]> {
        self.slots.get(key).map(Vec::as_slice)
    }

    /// Records that the entry at `slot` carries `key`.
    pub(crate) fn note_insert(&mut self, key: K, slot: usize) {
        self.slots.entry(key).or_default().push(slot);
    }

    /// Drops the record of `slot` under `key`, keeping list order.
    pub(crate) fn note_remove(&mut self, key: &K, slot: usize) {
        if let Some(list) = self.slots.get_mut(key) {
            if let Some(pos) = list.iter().position(|&s| s == slot) {
                list.remove(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_inserted_is_none() {
        let index: SubKeyIndex<u32> = SubKeyIndex::new();
        assert_eq!(index.get(&1), None);
    }

    #[test]
    fn records_in_insertion_order() {
        let mut index = SubKeyIndex::new();
        index.note_insert(1u32, 5);
        index.note_insert(1u32, 2);
        index.note_insert(2u32, 9);

        assert_eq!(index.get(&1), Some(&[5, 2][..]));
        assert_eq!(index.get(&2), Some(&[9][..]));
    }

    #[test]
    fn remove_keeps_order_and_empty_list() {
        let mut index = SubKeyIndex::new();
        index.note_insert(1u32, 5);
        index.note_insert(1u32, 2);
        index.note_insert(1u32, 7);

        index.note_remove(&1, 2);
        assert_eq!(index.get(&1), Some(&[5, 7][..]));

        index.note_remove(&1, 5);
        index.note_remove(&1, 7);
        // Emptied, not forgotten.
        assert_eq!(index.get(&1), Some(&[][..]));
    }

    #[test]
    fn remove_of_unknown_slot_is_a_no_op() {
        let mut index = SubKeyIndex::new();
        index.note_insert(1u32, 5);

        index.note_remove(&1, 99);
        index.note_remove(&2, 5);
        assert_eq!(index.get(&1), Some(&[5][..]));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut index = SubKeyIndex::new();
        index.note_insert(1u32, 0);
        index.clear();
        assert_eq!(index.get(&1), None);
    }
}
