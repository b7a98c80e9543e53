use core::any::TypeId;
use core::fmt;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

/// Map from [`TypeId`] to `V`, hashed with [`NoOpHashState`].
///
/// Backs the descriptor table, the abstract-type table and the static
/// descriptor cells of generic types.
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// An empty map. Usable in `static` initializers.
    ///
    /// ```
    /// use aot_utils::TypeIdMap;
    ///
    /// static EMPTY: TypeIdMap<&str> = TypeIdMap::new();
    /// assert_eq!(EMPTY.len(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Stores `f()` under `type_id` unless the key is taken.
    ///
    /// Returns whether the value was stored.
    pub fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        if let Entry::Vacant(slot) = self.0.entry(type_id) {
            slot.insert(f());
            return true;
        }
        false
    }

    /// The value under `type_id`, stored from `f()` first if absent.
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        self.0.entry(type_id).or_insert_with(f)
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Stores `value`, handing back the one it replaced.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    #[inline]
    pub fn remove(&mut self, type_id: &TypeId) -> Option<V> {
        self.0.remove(type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stored values, unordered.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

impl<V> Default for TypeIdMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TypeIdMap<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::TypeIdMap;
    use core::any::TypeId;

    #[test]
    fn first_insert_wins() {
        let mut map = TypeIdMap::new();
        assert!(map.try_insert(TypeId::of::<u8>(), || "first"));
        assert!(!map.try_insert(TypeId::of::<u8>(), || "second"));
        assert_eq!(map.get(&TypeId::of::<u8>()), Some(&"first"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_or_insert_runs_factory_once() {
        let mut map = TypeIdMap::new();
        *map.get_or_insert(TypeId::of::<str>(), || 1) += 10;
        *map.get_or_insert(TypeId::of::<str>(), || 100) += 10;
        assert_eq!(map.get(&TypeId::of::<str>()), Some(&21));
        assert_eq!(map.remove(&TypeId::of::<str>()), Some(21));
        assert!(map.is_empty());
    }
}
