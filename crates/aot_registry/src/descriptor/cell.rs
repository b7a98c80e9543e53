//! Static storage for descriptors.
//!
//! A non-generic type owns its `static` cell, so a [`OnceLock`] is enough.
//! Inside a generic function the same `static` is shared by every
//! instantiation, so [`GenericDescriptorCell`] keys its entries by
//! [`TypeId`] and leaks each descriptor once.

use core::any::{Any, TypeId};

use aot_os::sync::{OnceLock, PoisonError, RwLock};
use aot_utils::TypeIdMap;

use super::TypeDescriptor;

// -----------------------------------------------------------------------------
// NonGenericDescriptorCell

/// Descriptor storage for a non-generic type.
///
/// ```
/// use aot_registry::descriptor::{NonGenericDescriptorCell, ScalarKind, Shape, TypeDescriptor};
///
/// static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
///
/// let a = CELL.get_or_init(|| TypeDescriptor::new::<u8>(Shape::Scalar(ScalarKind::U8)));
/// let b = CELL.get_or_init(|| unreachable!());
/// assert!(core::ptr::eq(a, b));
/// ```
pub struct NonGenericDescriptorCell(OnceLock<TypeDescriptor>);

impl NonGenericDescriptorCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, creating it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeDescriptor) -> &TypeDescriptor {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericDescriptorCell

/// Descriptor storage shared by all instantiations of a generic type.
///
/// ```
/// use aot_registry::descriptor::{GenericDescriptorCell, Shape, TypeDescriptor, TypeRef};
/// use aot_registry::Shaped;
///
/// fn nullable<T: Shaped>() -> &'static TypeDescriptor {
///     static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
///     CELL.get_or_insert::<Option<T>>(|| {
///         TypeDescriptor::new::<Option<T>>(Shape::Nullable(TypeRef::of::<T>()))
///     })
/// }
///
/// assert!(nullable::<u8>().is::<Option<u8>>());
/// assert!(nullable::<String>().is::<Option<String>>());
/// ```
pub struct GenericDescriptorCell(RwLock<TypeIdMap<&'static TypeDescriptor>>);

impl GenericDescriptorCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor stored for `G`, creating it with `f` on first use.
    ///
    /// `f` runs outside the lock. If two threads race, the first insert wins.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(
        &self,
        f: impl FnOnce() -> TypeDescriptor,
    ) -> &'static TypeDescriptor {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeDescriptor,
    ) -> &'static TypeDescriptor {
        match self.get_by_type_id(type_id) {
            Some(desc) => desc,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeDescriptor> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeDescriptor) -> &'static TypeDescriptor {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
