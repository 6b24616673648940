//! Iterators for [`PairMap`].

use crate::key::CompositeKey;
use crate::map::{PairMap, Slot};

/// An iterator over the live entries of a [`PairMap`], in slot order.
pub struct Iter<'a, A, B, V> {
    slots: std::slice::Iter<'a, Slot<A, B, V>>,
}

impl<'a, A, B, V> Iter<'a, A, B, V> {
    pub(crate) fn new(slots: &'a [Slot<A, B, V>]) -> Self {
        Self {
            slots: slots.iter(),
        }
    }
}

impl<'a, A, B, V> Iterator for Iter<'a, A, B, V> {
    type Item = (&'a CompositeKey<A, B>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some((key, value)) = &slot.data {
                return Some((key, value));
            }
        }
        None
    }
}

/// An iterator over the keys of a [`PairMap`].
pub struct Keys<'a, A, B, V> {
    inner: Iter<'a, A, B, V>,
}

impl<'a, A, B, V> Keys<'a, A, B, V> {
    pub(crate) fn new(iter: Iter<'a, A, B, V>) -> Self {
        Self { inner: iter }
    }
}

impl<'a, A, B, V> Iterator for Keys<'a, A, B, V> {
    type Item = &'a CompositeKey<A, B>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a [`PairMap`].
pub struct Values<'a, A, B, V> {
    inner: Iter<'a, A, B, V>,
}

impl<'a, A, B, V> Values<'a, A, B, V> {
    pub(crate) fn new(iter: Iter<'a, A, B, V>) -> Self {
        Self { inner: iter }
    }
}

impl<'a, A, B, V> Iterator for Values<'a, A, B, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A consuming iterator over the entries of a [`PairMap`].
pub struct IntoIter<A, B, V> {
    slots: std::vec::IntoIter<Slot<A, B, V>>,
}

impl<A, B, V> Iterator for IntoIter<A, B, V> {
    type Item = (CompositeKey<A, B>, V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(entry) = slot.data {
                return Some(entry);
            }
        }
        None
    }
}

impl<'a, A, B, V, S> IntoIterator for &'a PairMap<A, B, V, S> {
    type Item = (&'a CompositeKey<A, B>, &'a V);
    type IntoIter = Iter<'a, A, B, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A, B, V, S> IntoIterator for PairMap<A, B, V, S> {
    type Item = (CompositeKey<A, B>, V);
    type IntoIter = IntoIter<A, B, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.into_slots().into_iter(),
        }
    }
}

/// Which side of the composite key a sub-key lookup filters on.
pub(crate) enum SubKeyFilter<'a, A, B> {
    First(&'a A),
    Second(&'a B),
}

impl<A: Eq, B: Eq> SubKeyFilter<'_, A, B> {
    #[inline]
    fn matches(&self, key: &CompositeKey<A, B>) -> bool {
        match self {
            SubKeyFilter::First(first) => key.first() == *first,
            SubKeyFilter::Second(second) => key.second() == *second,
        }
    }
}

/// A lazy view over the values recorded under one sub-key.
///
/// Each recorded slot is re-validated on the way out: it must still be
/// live and its key must still match the sub-key exactly. A record whose
/// slot is out of range or no longer matching is a dead end, never an
/// error.
pub struct SubKeyValues<'a, A, B, V> {
    slots: &'a [Slot<A, B, V>],
    indexes: std::slice::Iter<'a, usize>,
    filter: SubKeyFilter<'a, A, B>,
}

impl<'a, A, B, V> SubKeyValues<'a, A, B, V> {
    pub(crate) fn new(
        slots: &'a [Slot<A, B, V>],
        indexes: &'a [usize],
        filter: SubKeyFilter<'a, A, B>,
    ) -> Self {
        Self {
            slots,
            indexes: indexes.iter(),
            filter,
        }
    }
}

impl<'a, A: Eq, B: Eq, V> Iterator for SubKeyValues<'a, A, B, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        for &i in self.indexes.by_ref() {
            if let Some(slot) = self.slots.get(i) {
                if let Some((key, value)) = &slot.data {
                    if self.filter.matches(key) {
                        return Some(value);
                    }
                }
            }
        }
        None
    }
}
