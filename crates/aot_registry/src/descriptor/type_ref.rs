use core::any::TypeId;
use core::fmt;

use super::Shaped;
use crate::error::ConfigurationError;
use crate::registry::{Registrar, register_list_family};

pub(crate) type RegisterFn = fn(&mut Registrar<'_>) -> Result<(), ConfigurationError>;

fn visit<T: Shaped>(registrar: &mut Registrar<'_>) -> Result<(), ConfigurationError> {
    registrar.visit::<T>()
}

// -----------------------------------------------------------------------------
// TypeRef

/// Edge from a descriptor to one of its sub-types.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    path: &'static str,
    register: RegisterFn,
    list_family: Option<RegisterFn>,
}

impl TypeRef {
    /// Refers to `T`.
    #[inline]
    pub fn of<T: Shaped>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
            register: visit::<T>,
            list_family: None,
        }
    }

    /// Refers to `T` as the element of a sequence.
    ///
    /// Registering the element also registers `Vec<T>`, `Box<[T]>` and
    /// `VecDeque<T>`, the containers a sequence of `T` can be rebuilt into.
    #[inline]
    pub fn element<T: Shaped>() -> Self {
        Self {
            list_family: Some(register_list_family::<T>),
            ..Self::of::<T>()
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    #[inline]
    pub(crate) fn register(&self, registrar: &mut Registrar<'_>) -> Result<(), ConfigurationError> {
        (self.register)(registrar)
    }

    #[inline]
    pub(crate) fn register_list_family(
        &self,
        registrar: &mut Registrar<'_>,
    ) -> Result<(), ConfigurationError> {
        match self.list_family {
            Some(f) => f(registrar),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.path).finish()
    }
}

// -----------------------------------------------------------------------------
// FieldRef

/// A named field of a record.
///
/// Tuple fields are named by index, enum fields by `Variant.field`.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef {
    name: &'static str,
    ty: TypeRef,
}

impl FieldRef {
    #[inline]
    pub fn new<T: Shaped>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeRef::of::<T>(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }
}
