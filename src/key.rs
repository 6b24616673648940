//! Composite key type and the sub-key contract.

use std::hash::Hash;

/// Contract for one component of a [`CompositeKey`].
///
/// Sub-keys are opaque values that only need equality and hashing. Types
/// that carry an absence sentinel report it through [`is_absent`]; the map
/// rejects keys built from absent components, so enforcement lives in the
/// container rather than in the key type. `Option<T>` treats `None` as
/// absent; everything else uses the default (never absent).
///
/// Implementing the trait for a custom sub-key type is a one-liner:
///
/// ```
/// use pairmap::KeyPart;
///
/// #[derive(PartialEq, Eq, Hash)]
/// struct DeviceId(u64);
///
/// impl KeyPart for DeviceId {}
/// ```
///
/// [`is_absent`]: KeyPart::is_absent
pub trait KeyPart: Eq + Hash {
    /// Returns `true` when the value is its type's absence sentinel.
    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}

impl<T: Eq + Hash> KeyPart for Option<T> {
    #[inline]
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

macro_rules! impl_key_part {
    ($($t:ty),* $(,)?) => {
        $(impl KeyPart for $t {})*
    };
}

impl_key_part!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool,
    char, String, &str,
);

/// An immutable two-part key.
///
/// Equality and hashing combine both parts in order, so `(1, 2)` and
/// `(2, 1)` are distinct keys even when the part types coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeKey<A, B> {
    first: A,
    second: B,
}

impl<A, B> CompositeKey<A, B> {
    /// Builds a key from its two parts.
    #[inline]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// The first sub-key.
    #[inline]
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The second sub-key.
    #[inline]
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Consumes the key, returning both parts.
    #[inline]
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for CompositeKey<A, B> {
    #[inline]
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}
