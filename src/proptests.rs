//! Model-based property tests: arbitrary operation sequences applied to a
//! [`PairMap`] and to a `HashMap<(A, B), V>` oracle must agree.

use std::collections::HashMap;

use proptest::prelude::*;

use crate::{CompositeKey, PairMap};

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u8, u32),
    Add(u8, u8, u32),
    Remove(u8, u8),
}

// Narrow sub-key space on purpose: plenty of collisions, upserts,
// duplicate adds and slot reuse.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<u8>(), any::<u32>()).prop_map(|(a, b, v)| Op::Insert(a, b, v)),
        (any::<u8>(), any::<u8>(), any::<u32>()).prop_map(|(a, b, v)| Op::Add(a, b, v)),
        (any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::Remove(a, b)),
    ]
}

proptest! {
    #[test]
    fn matches_hash_map_model(ops in proptest::collection::vec(op_strategy(), 0..500)) {
        let mut map = PairMap::with_capacity(3);
        let mut model: HashMap<(u8, u8), u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(a, b, v) => {
                    let replaced = map.insert(CompositeKey::new(a, b), v).unwrap();
                    prop_assert_eq!(replaced, model.insert((a, b), v));
                }
                Op::Add(a, b, v) => {
                    let added = map.add(CompositeKey::new(a, b), v);
                    if model.contains_key(&(a, b)) {
                        prop_assert!(added.is_err());
                    } else {
                        prop_assert!(added.is_ok());
                        model.insert((a, b), v);
                    }
                }
                Op::Remove(a, b) => {
                    let removed = map.remove(&CompositeKey::new(a, b)).unwrap();
                    prop_assert_eq!(removed, model.remove(&(a, b)).is_some());
                }
            }
        }

        prop_assert_eq!(map.len(), model.len());
        prop_assert_eq!(map.iter().count(), model.len());

        for (&(a, b), v) in &model {
            prop_assert_eq!(map.try_get(&CompositeKey::new(a, b)), Some(v));
        }

        // Per-sub-key lookups must yield exactly the live values.
        let mut by_first: HashMap<u8, Vec<u32>> = HashMap::new();
        let mut by_second: HashMap<u8, Vec<u32>> = HashMap::new();
        for (&(a, b), &v) in &model {
            by_first.entry(a).or_default().push(v);
            by_second.entry(b).or_default().push(v);
        }
        for (a, mut expected) in by_first {
            let mut got: Vec<u32> = map.values_by_first(&a).unwrap().copied().collect();
            got.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(got, expected);
        }
        for (b, mut expected) in by_second {
            let mut got: Vec<u32> = map.values_by_second(&b).unwrap().copied().collect();
            got.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(got, expected);
        }
    }

    #[test]
    fn keys_survive_growth(keys in proptest::collection::hash_set(any::<(u16, u16)>(), 1..300)) {
        let mut map = PairMap::with_capacity(3);
        for &(a, b) in &keys {
            map.add_parts(a, b, (a, b)).unwrap();
        }

        prop_assert_eq!(map.len(), keys.len());
        for &(a, b) in &keys {
            prop_assert_eq!(map.try_get(&CompositeKey::new(a, b)), Some(&(a, b)));
        }
    }
}
