//! Error handling for `pairmap`.

use thiserror::Error;

/// Convenience alias used by all fallible map operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`PairMap`](crate::PairMap) operations.
///
/// Every failure is reported synchronously at the call that triggered it,
/// and a failing operation never mutates the map first.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A direct-lookup accessor was used on an absent key.
    #[error("key not found")]
    KeyNotFound,

    /// A strict add was used on a key that is already present.
    #[error("key has already been added")]
    DuplicateKey,

    /// A sub-key was its type's absence sentinel (e.g. `Option::None`).
    #[error("sub-key is an absence sentinel")]
    AbsentSubKey,
}
