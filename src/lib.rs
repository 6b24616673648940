//! A hash map keyed by a two-part composite key, with fast value lookup by
//! either part on its own.
//!
//! [`PairMap`] stores `(CompositeKey<A, B>, V)` entries in a single closed
//! hash table and keeps one auxiliary index per sub-key, so "all values
//! whose first sub-key is `x`" (and the symmetric question for the second
//! sub-key) is answered without scanning the table.
//!
//! Sub-keys are independent, opaque `Eq + Hash` values; the composite key
//! combines them order-sensitively, so `(1, 2)` and `(2, 1)` are distinct
//! keys. See [`KeyPart`] for the one-line opt-in required of custom
//! sub-key types.
//!
//! # Examples
//!
//! ```
//! use pairmap::{CompositeKey, PairMap};
//!
//! let mut map = PairMap::new();
//! map.add_parts(5u32, 10u32, "Hi")?;
//! map.add_parts(10u32, 5u32, "Hello")?;
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&CompositeKey::new(5, 10))?, &"Hi");
//!
//! let with_first_10: Vec<_> = map.values_by_first(&10).unwrap().collect();
//! assert_eq!(with_first_10, vec![&"Hello"]);
//! # Ok::<(), pairmap::Error>(())
//! ```

mod error;
mod index;
mod key;
mod map;
mod primes;

pub mod iter;

pub use error::{Error, Result};
pub use key::{CompositeKey, KeyPart};
pub use map::PairMap;

#[cfg(test)]
mod proptests;
