//! The binding table and its closure registrar.

// -----------------------------------------------------------------------------
// Modules

mod registrar;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use registrar::Registrar;

pub(crate) use registrar::register_list_family;

use core::any::{TypeId, type_name};

use aot_utils::TypeIdMap;
use aot_utils::hash::{FixedHashState, HashMap};

use crate::binding::SerializerBinding;
use crate::descriptor::{Shaped, TypeDescriptor};
use crate::error::{CodecError, ConfigurationError};
use crate::format::WireFormat;

// -----------------------------------------------------------------------------
// TypeRegistry

/// The table of serializer bindings consulted by the engine.
///
/// Holds one [`TypeDescriptor`] per registered type and one
/// [`SerializerBinding`] per type and [`WireFormat`]. Populated during
/// start-up, read-only afterwards.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use aot_registry::{TypeRegistry, WireFormat};
///
/// let mut registry = TypeRegistry::new();
/// registry.register_closure::<HashMap<String, Vec<u8>>>().unwrap();
///
/// assert!(registry.contains_type::<Vec<u8>>());
/// assert!(registry.contains_type::<Box<[u8]>>());
///
/// let binding = registry.require_binding::<Vec<u8>>(WireFormat::Ron).unwrap();
/// assert_eq!(binding.write(&vec![1_u8, 2]).unwrap(), "[1,2]");
/// ```
#[derive(Clone)]
pub struct TypeRegistry {
    descriptors: TypeIdMap<&'static TypeDescriptor>,
    bindings: HashMap<(TypeId, WireFormat), SerializerBinding>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    abstracts: TypeIdMap<&'static str>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            descriptors: TypeIdMap::new(),
            bindings: HashMap::with_hasher(FixedHashState),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            abstracts: TypeIdMap::new(),
        }
    }

    // The type must not already exist.
    fn insert_descriptor(&mut self, descriptor: &'static TypeDescriptor) {
        self.descriptors.insert(descriptor.type_id(), descriptor);
        self.type_path_to_id
            .insert(descriptor.type_path(), descriptor.type_id());
    }

    fn insert_binding(&mut self, binding: SerializerBinding) {
        self.bindings
            .insert((binding.type_id(), binding.format()), binding);
    }

    fn remove_type(&mut self, type_id: TypeId) {
        if let Some(descriptor) = self.descriptors.remove(&type_id) {
            self.type_path_to_id.remove(descriptor.type_path());
        }
        for format in WireFormat::ALL {
            self.bindings.remove(&(type_id, format));
        }
    }

    /// Registers `T` and every type reachable from it, with bindings for
    /// every [`WireFormat`].
    ///
    /// Types already present are skipped, so repeated calls are cheap.
    /// Each binding is probed as it is created. If any probe fails, every
    /// type added by this call is removed again and the error is returned.
    pub fn register_closure<T: Shaped>(&mut self) -> Result<(), ConfigurationError> {
        let mut registrar = Registrar::new(self);
        match registrar.visit::<T>() {
            Ok(()) => {
                #[cfg(all(feature = "debug", debug_assertions))]
                registrar.assert_complete();

                if !registrar.added().is_empty() {
                    log::debug!(
                        "closure of `{}` complete, {} type(s) added",
                        type_name::<T>(),
                        registrar.added().len(),
                    );
                }
                Ok(())
            }
            Err(err) => {
                let added = registrar.added().len();
                registrar.rollback();
                log::error!(
                    "closure of `{}` rolled back ({added} type(s) removed): {err}",
                    type_name::<T>(),
                );
                Err(err)
            }
        }
    }

    /// Registers the built-in scalar set, see [`BuiltinProbe`](crate::BuiltinProbe).
    pub fn register_builtins(&mut self) -> Result<(), ConfigurationError> {
        crate::builtins::register(self)
    }

    /// Registers every type submitted with `#[shaped(auto_register)]` or
    /// `impl_auto_register!`.
    ///
    /// Returns how many roots were visited, or the first error. Without the
    /// `auto_register` feature nothing is collected and `Ok(0)` is returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aot_registry::{Shaped, TypeRegistry};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Shaped, Serialize, Deserialize)]
    /// #[shaped(auto_register)]
    /// struct Settings {
    ///     retries: u8,
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// assert!(registry.auto_register().unwrap() >= 1);
    /// assert!(registry.contains_type::<Settings>());
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> Result<usize, ConfigurationError> {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::register_submitted(self)
        }

        #[cfg(not(feature = "auto_register"))]
        {
            Ok(0)
        }
    }

    /// Records `T` as an abstract type, usually a trait object.
    ///
    /// Abstract types have no bindings. They can only be materialized
    /// through a proxy, see [`Instantiator`](crate::instantiate::Instantiator).
    /// Returns `false` if `T` was already recorded.
    pub fn register_abstract<T: ?Sized + 'static>(&mut self) -> bool {
        self.abstracts
            .try_insert(TypeId::of::<T>(), || type_name::<T>())
    }

    /// Returns the type path of a registered abstract type.
    #[inline]
    pub fn get_abstract(&self, type_id: TypeId) -> Option<&'static str> {
        self.abstracts.get(&type_id).copied()
    }

    /// Whether a concrete type with the given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains(&type_id)
    }

    #[inline]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(TypeId::of::<T>())
    }

    /// Number of registered concrete types.
    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    #[inline]
    pub fn get_descriptor(&self, type_id: TypeId) -> Option<&'static TypeDescriptor> {
        self.descriptors.get(&type_id).copied()
    }

    /// Looks a descriptor up by [`type_name`] path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static TypeDescriptor> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get_descriptor(*id),
            None => None,
        }
    }

    /// The binding of a type in `format`, if registered.
    #[inline]
    pub fn get_binding(&self, type_id: TypeId, format: WireFormat) -> Option<&SerializerBinding> {
        self.bindings.get(&(type_id, format))
    }

    #[inline]
    pub fn get_binding_of<T: ?Sized + 'static>(
        &self,
        format: WireFormat,
    ) -> Option<&SerializerBinding> {
        self.get_binding(TypeId::of::<T>(), format)
    }

    /// Like [`get_binding_of`](Self::get_binding_of), failing with
    /// [`CodecError::Unregistered`].
    pub fn require_binding<T: ?Sized + 'static>(
        &self,
        format: WireFormat,
    ) -> Result<&SerializerBinding, CodecError> {
        self.get_binding_of::<T>(format)
            .ok_or(CodecError::Unregistered {
                type_path: type_name::<T>(),
                format,
            })
    }

    /// Descriptors of all registered concrete types, in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeDescriptor> + '_ {
        self.descriptors.values().copied()
    }

    /// All bindings, in arbitrary order.
    pub fn bindings(&self) -> impl ExactSizeIterator<Item = &SerializerBinding> {
        self.bindings.values()
    }
}
