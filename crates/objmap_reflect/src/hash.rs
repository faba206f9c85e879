//! Hash states for the metadata tables, plus a `TypeId`-keyed map alias.
//!
//! Both states are const-constructible so the tables can live in `static`
//! memo cells.

use core::any::TypeId;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

/// A fixed hash seed, so lookups do not depend on process-random state.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x51C3A59E2D4B8F07);

/// A hasher whose results depend only on the input bytes.
pub type FixedHasher = FoldHasher<'static>;

/// Hash state with a fixed seed, used for the string-keyed lookup tables.
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A map keyed by field or type-path strings.
pub type StrMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// NoOpHashState

/// A pass-through hasher: `write_u64` stores the input as the hash.
///
/// `TypeId` already contains a high-quality hash, so re-hashing it is
/// wasted work.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // Fallback for key types that hash through `write`; folds the bytes
        // so that a single `write_u32(x)` matches `write_u64(x)`.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Hash state for [`NoOpHasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

/// A map with [`TypeId`] as the fixed key type.
pub type TypeIdMap<V> = hashbrown::HashMap<TypeId, V, NoOpHashState>;

/// Creates an empty [`TypeIdMap`], usable in `const` contexts.
#[inline]
pub const fn type_id_map<V>() -> TypeIdMap<V> {
    TypeIdMap::with_hasher(NoOpHashState)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::{BuildHasher, Hash, Hasher};

    #[test]
    fn noop_hasher_passes_u64_through() {
        let mut hasher = NoOpHashState.build_hasher();
        3_u64.hash(&mut hasher);
        assert_eq!(hasher.finish(), 3);
    }

    #[test]
    fn fixed_state_is_stable() {
        let a = FixedHashState.hash_one("member");
        let b = FixedHashState.hash_one("member");
        assert_eq!(a, b);
    }
}
