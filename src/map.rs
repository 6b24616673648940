//! Composite-keyed hash map with per-sub-key slot indexes.
//!
//! The core table is a classic closed layout: a prime-sized bucket array of
//! chain heads plus a flat slot arena, with collision chains and the free
//! list both threaded through integer `next` links. Two side indexes map
//! each sub-key value to the slots of the entries carrying it, so lookups
//! by a single sub-key never scan the whole table. All three structures are
//! updated together on every insert and remove.

use std::hash::{BuildHasher, RandomState};

use crate::error::{Error, Result};
use crate::index::SubKeyIndex;
use crate::iter::{Iter, Keys, SubKeyFilter, SubKeyValues, Values};
use crate::key::{CompositeKey, KeyPart};
use crate::primes;

/// Chain terminator for bucket heads, collision links and the free list.
pub(crate) const NIL: usize = usize::MAX;

/// Hash sentinel marking a recycled slot.
pub(crate) const FREE: u64 = u64::MAX;

/// Live hashes are masked to 63 bits so they can never equal `FREE`.
const HASH_MASK: u64 = u64::MAX >> 1;

/// One slot in the entry arena.
pub(crate) struct Slot<A, B, V> {
    /// Masked key hash, or [`FREE`] when the slot is on the free list.
    pub(crate) hash: u64,
    /// Next slot in this bucket's collision chain, or next free slot.
    pub(crate) next: usize,
    /// Key-value payload; `None` exactly when the slot is free.
    pub(crate) data: Option<(CompositeKey<A, B>, V)>,
}

impl<A, B, V> Slot<A, B, V> {
    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        self.hash != FREE
    }
}

/// A hash map keyed by a two-part [`CompositeKey`], with fast value lookup
/// by either part on its own.
///
/// Point operations behave like a normal hash map over the whole key.
/// Additionally, [`values_by_first`](Self::values_by_first) and
/// [`values_by_second`](Self::values_by_second) enumerate the values of all
/// live entries sharing one sub-key without scanning the table.
///
/// Not safe for concurrent mutation; all mutating access goes through
/// `&mut self`.
pub struct PairMap<A, B, V, S = RandomState> {
    /// Bucket heads into the slot arena; always a prime number of buckets.
    buckets: Vec<usize>,
    /// Slot arena. Grows to `buckets.len()` before the table resizes.
    slots: Vec<Slot<A, B, V>>,
    /// Head of the recycled-slot chain.
    free_head: usize,
    /// Number of slots currently on the free list.
    free_count: usize,
    /// Index from first sub-key to entry slots.
    by_first: SubKeyIndex<A>,
    /// Index from second sub-key to entry slots.
    by_second: SubKeyIndex<B>,
    hash_builder: S,
}

impl<A, B, V> PairMap<A, B, V, RandomState> {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty map pre-sized for at least `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<A, B, V, S> PairMap<A, B, V, S> {
    /// Creates an empty map using `hash_builder` to hash composite keys.
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty map with the given capacity and hasher.
    ///
    /// The capacity is rounded up to the sizing policy's next prime.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let capacity = primes::next_prime(capacity);
        Self {
            buckets: vec![NIL; capacity],
            slots: Vec::with_capacity(capacity),
            free_head: NIL,
            free_count: 0,
            by_first: SubKeyIndex::new(),
            by_second: SubKeyIndex::new(),
            hash_builder,
        }
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_count
    }

    /// Returns `true` if the map holds no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries the map can hold before growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns a reference to the hasher.
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Iterates over live entries in slot order.
    ///
    /// Calling again starts a fresh pass. Slot order matches insertion
    /// order until slots are recycled or the table grows.
    #[inline]
    pub fn iter(&self) -> Iter<'_, A, B, V> {
        Iter::new(&self.slots)
    }

    /// Iterates over the keys of live entries, in slot order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, A, B, V> {
        Keys::new(self.iter())
    }

    /// Iterates over the values of live entries, in slot order.
    #[inline]
    pub fn values(&self) -> Values<'_, A, B, V> {
        Values::new(self.iter())
    }

    /// Removes all entries, keeping the allocated buckets.
    pub fn clear(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        for head in &mut self.buckets {
            *head = NIL;
        }
        self.slots.clear();
        self.free_head = NIL;
        self.free_count = 0;
        self.by_first.clear();
        self.by_second.clear();
    }

    /// Consumes the arena for the owned iterator.
    #[inline]
    pub(crate) fn into_slots(self) -> Vec<Slot<A, B, V>> {
        self.slots
    }

    /// Rebuilds buckets at the next prime capacity.
    ///
    /// Only called when the arena is full and the free list is empty, so
    /// every slot is live. Chains are rebuilt from the stored hashes; keys
    /// are not re-hashed and slot indices do not move, so the sub-key
    /// indexes stay valid.
    fn grow(&mut self) {
        let new_capacity = primes::expand(self.slots.len());
        let mut buckets = vec![NIL; new_capacity];
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_live() {
                let bucket = (slot.hash % new_capacity as u64) as usize;
                slot.next = buckets[bucket];
                buckets[bucket] = i;
            }
        }
        self.buckets = buckets;
        self.slots.reserve(new_capacity - self.slots.len());
    }
}

impl<A, B, V, S> PairMap<A, B, V, S>
where
    A: KeyPart,
    B: KeyPart,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &CompositeKey<A, B>) -> u64 {
        self.hash_builder.hash_one(key) & HASH_MASK
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn check_key(key: &CompositeKey<A, B>) -> Result<()> {
        if key.first().is_absent() || key.second().is_absent() {
            Err(Error::AbsentSubKey)
        } else {
            Ok(())
        }
    }

    /// Slot index of `key`, walking its bucket's collision chain.
    ///
    /// The stored-hash comparison is a short-circuit; full key equality
    /// decides.
    fn find(&self, key: &CompositeKey<A, B>) -> Option<usize> {
        let hash = self.hash_key(key);
        let mut i = self.buckets[self.bucket_of(hash)];
        while i != NIL {
            let slot = &self.slots[i];
            if slot.hash == hash {
                if let Some((k, _)) = &slot.data {
                    if k == key {
                        return Some(i);
                    }
                }
            }
            i = slot.next;
        }
        None
    }

    /// Returns the value stored under `key`.
    ///
    /// Fails with [`Error::KeyNotFound`] if the key is absent and
    /// [`Error::AbsentSubKey`] if either sub-key is an absence sentinel.
    pub fn get(&self, key: &CompositeKey<A, B>) -> Result<&V> {
        Self::check_key(key)?;
        self.try_get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &CompositeKey<A, B>) -> Result<&mut V> {
        Self::check_key(key)?;
        let i = self.find(key).ok_or(Error::KeyNotFound)?;
        match &mut self.slots[i].data {
            Some((_, value)) => Ok(value),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Non-failing lookup.
    ///
    /// A key with an absent sub-key can never have been stored, so it
    /// simply answers `None`.
    pub fn try_get(&self, key: &CompositeKey<A, B>) -> Option<&V> {
        let i = self.find(key)?;
        self.slots[i].data.as_ref().map(|(_, value)| value)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &CompositeKey<A, B>) -> Result<bool> {
        Self::check_key(key)?;
        Ok(self.find(key).is_some())
    }

    /// Removes `key`, returning whether an entry was removed.
    ///
    /// The slot is unlinked from its bucket chain, its payload dropped, the
    /// slot recycled onto the free list, and its record pruned from both
    /// sub-key indexes.
    pub fn remove(&mut self, key: &CompositeKey<A, B>) -> Result<bool> {
        Self::check_key(key)?;
        let hash = self.hash_key(key);
        let bucket = self.bucket_of(hash);

        let mut prev = NIL;
        let mut i = self.buckets[bucket];
        while i != NIL {
            let next = self.slots[i].next;
            let matched = self.slots[i].hash == hash
                && matches!(&self.slots[i].data, Some((k, _)) if k == key);
            if matched {
                if prev == NIL {
                    self.buckets[bucket] = next;
                } else {
                    self.slots[prev].next = next;
                }
                if let Some((k, _)) = self.slots[i].data.take() {
                    self.by_first.note_remove(k.first(), i);
                    self.by_second.note_remove(k.second(), i);
                }
                self.slots[i].hash = FREE;
                self.slots[i].next = self.free_head;
                self.free_head = i;
                self.free_count += 1;
                return Ok(true);
            }
            prev = i;
            i = next;
        }
        Ok(false)
    }

    /// Values of every live entry whose first sub-key equals `sub_key`.
    ///
    /// Returns `None` only if no entry with this sub-key was ever inserted;
    /// a sub-key whose entries were all removed yields `Some` of an empty
    /// sequence. The returned iterator is lazy and restartable by calling
    /// again.
    pub fn values_by_first<'a>(&'a self, sub_key: &'a A) -> Option<SubKeyValues<'a, A, B, V>> {
        let indexes = self.by_first.get(sub_key)?;
        Some(SubKeyValues::new(
            &self.slots,
            indexes,
            SubKeyFilter::First(sub_key),
        ))
    }

    /// Values of every live entry whose second sub-key equals `sub_key`.
    ///
    /// Symmetric to [`values_by_first`](Self::values_by_first).
    pub fn values_by_second<'a>(&'a self, sub_key: &'a B) -> Option<SubKeyValues<'a, A, B, V>> {
        let indexes = self.by_second.get(sub_key)?;
        Some(SubKeyValues::new(
            &self.slots,
            indexes,
            SubKeyFilter::Second(sub_key),
        ))
    }
}

impl<A, B, V, S> PairMap<A, B, V, S>
where
    A: KeyPart + Clone,
    B: KeyPart + Clone,
    S: BuildHasher,
{
    /// Upserts: inserts `key`, or replaces the value of an existing entry
    /// in place, returning the replaced value.
    ///
    /// Replacing a value leaves the sub-key indexes untouched, since the
    /// key's components are unchanged.
    pub fn insert(&mut self, key: CompositeKey<A, B>, value: V) -> Result<Option<V>> {
        self.insert_inner(key, value, true)
    }

    /// Strict insert; fails with [`Error::DuplicateKey`] if `key` is
    /// already present.
    pub fn add(&mut self, key: CompositeKey<A, B>, value: V) -> Result<()> {
        self.insert_inner(key, value, false).map(|_| ())
    }

    /// Convenience form of [`add`](Self::add) building the composite key
    /// from its parts.
    #[inline]
    pub fn add_parts(&mut self, first: A, second: B, value: V) -> Result<()> {
        self.add(CompositeKey::new(first, second), value)
    }

    fn insert_inner(
        &mut self,
        key: CompositeKey<A, B>,
        value: V,
        overwrite: bool,
    ) -> Result<Option<V>> {
        Self::check_key(&key)?;
        let hash = self.hash_key(&key);
        let mut bucket = self.bucket_of(hash);

        // An existing equal key is an upsert or a rejection, never a new
        // slot.
        let mut i = self.buckets[bucket];
        while i != NIL {
            let slot = &mut self.slots[i];
            if slot.hash == hash {
                if let Some((k, v)) = &mut slot.data {
                    if *k == key {
                        if !overwrite {
                            return Err(Error::DuplicateKey);
                        }
                        return Ok(Some(std::mem::replace(v, value)));
                    }
                }
            }
            i = slot.next;
        }

        let index = if self.free_count > 0 {
            let index = self.free_head;
            self.free_head = self.slots[index].next;
            self.free_count -= 1;
            index
        } else {
            if self.slots.len() == self.buckets.len() {
                self.grow();
                bucket = self.bucket_of(hash);
            }
            self.slots.push(Slot {
                hash: FREE,
                next: NIL,
                data: None,
            });
            self.slots.len() - 1
        };

        let (first, second) = (key.first().clone(), key.second().clone());
        let slot = &mut self.slots[index];
        slot.hash = hash;
        slot.next = self.buckets[bucket];
        slot.data = Some((key, value));
        self.buckets[bucket] = index;

        self.by_first.note_insert(first, index);
        self.by_second.note_insert(second, index);
        Ok(None)
    }
}

impl<A, B, V> Default for PairMap<A, B, V, RandomState> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
