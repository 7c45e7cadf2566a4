//! Specialized collection types

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use slotmap::{SlotMap, DefaultKey};

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<DefaultKey, T>;

/// Typed handle for type-safe asset references
///
/// Wraps a generational slot map key. Once the slot is vacated the handle
/// stops resolving, even if the slot is later reused.
pub struct TypedHandle<T> {
    key: DefaultKey,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> TypedHandle<T> {
    /// Create a new typed handle from a key
    pub const fn new(key: DefaultKey) -> Self {
        Self {
            key,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn key(&self) -> DefaultKey {
        self.key
    }
}

// Manual impls so the handle stays `Copy`/`Eq` regardless of `T`.
impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> Hash for TypedHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for TypedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedHandle").field(&self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NotCopy(#[allow(dead_code)] String);

    #[test]
    fn test_handle_is_copy_for_non_copy_payload() {
        let mut map: HandleMap<NotCopy> = HandleMap::new();
        let handle = TypedHandle::<NotCopy>::new(map.insert(NotCopy("a".into())));
        let copy = handle;

        assert_eq!(handle, copy);
        assert!(map.contains_key(copy.key()));
    }

    #[test]
    fn test_stale_handle_does_not_resolve_after_slot_reuse() {
        let mut map: HandleMap<u32> = HandleMap::new();
        let old = TypedHandle::<u32>::new(map.insert(1));
        map.remove(old.key());

        let new = TypedHandle::<u32>::new(map.insert(2));

        assert_ne!(old, new);
        assert!(map.get(old.key()).is_none());
        assert_eq!(map.get(new.key()), Some(&2));
    }
}
