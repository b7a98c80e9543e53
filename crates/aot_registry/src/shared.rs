use core::ops::Deref;

use aot_os::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::descriptor::Shaped;
use crate::error::ConfigurationError;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// SharedRegistry

/// A [`TypeRegistry`] shared between threads during start-up.
///
/// Registrations take the write lock, so closures are built one at a time.
/// Lookups take the read lock. Call [`freeze`](Self::freeze) once start-up
/// is done to get a lock-free view.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// [`TypeRegistry::register_closure`] under the write lock.
    pub fn register_closure<T: Shaped>(&self) -> Result<(), ConfigurationError> {
        self.write().register_closure::<T>()
    }

    /// Snapshots the registry for lock-free reads.
    ///
    /// Later registrations through `self` are not visible in the snapshot.
    pub fn freeze(&self) -> FrozenRegistry {
        FrozenRegistry(Arc::new(self.read().clone()))
    }
}

// -----------------------------------------------------------------------------
// FrozenRegistry

/// Read-only, cheaply clonable registry.
#[derive(Clone)]
pub struct FrozenRegistry(Arc<TypeRegistry>);

impl FrozenRegistry {
    pub fn new(registry: TypeRegistry) -> Self {
        Self(Arc::new(registry))
    }
}

impl Deref for FrozenRegistry {
    type Target = TypeRegistry;

    #[inline]
    fn deref(&self) -> &TypeRegistry {
        &self.0
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};
    use std::thread;

    use super::SharedRegistry;
    use crate::WireFormat;

    #[test]
    fn concurrent_roots_share_one_table() {
        let shared = SharedRegistry::default();

        let handles = [
            thread::spawn({
                let shared = shared.clone();
                move || shared.register_closure::<Vec<HashMap<String, u64>>>()
            }),
            thread::spawn({
                let shared = shared.clone();
                move || shared.register_closure::<BTreeMap<u64, Option<String>>>()
            }),
            thread::spawn({
                let shared = shared.clone();
                move || shared.register_closure::<Vec<u64>>()
            }),
        ];
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let frozen = shared.freeze();
        for format in WireFormat::ALL {
            assert!(frozen.get_binding_of::<u64>(format).is_some());
            assert!(frozen.get_binding_of::<String>(format).is_some());
            assert!(frozen.get_binding_of::<Option<String>>(format).is_some());
            assert!(frozen.get_binding_of::<HashMap<String, u64>>(format).is_some());
        }

        shared.register_closure::<bool>().unwrap();
        assert!(!frozen.contains_type::<bool>());
        assert!(shared.read().contains_type::<bool>());
    }
}
