//! Type descriptors: identity plus a closed shape classification.
//!
//! A [`TypeDescriptor`] is built once per type, stored in a static cell
//! and never changed afterwards. Sub-types are reached through
//! [`TypeRef`]s, which also carry the entry point that registers the
//! sub-type's closure.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod shape;
mod type_ref;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericDescriptorCell, NonGenericDescriptorCell};
pub use shape::{ListKind, MapKind, RecordShape, ScalarKind, Shape};
pub use type_ref::{FieldRef, TypeRef};

use core::any::{Any, TypeId};
use core::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Produces a boxed default value.
pub type ConstructorFn = fn() -> Box<dyn Any + Send>;

// -----------------------------------------------------------------------------
// Shaped

/// A type that can describe its own shape.
///
/// Implemented for the built-in scalars and containers. Use
/// `#[derive(Shaped)]` for records.
///
/// # Manual implementation
///
/// ```
/// use aot_registry::Shaped;
/// use aot_registry::descriptor::{NonGenericDescriptorCell, ScalarKind, Shape, TypeDescriptor};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// #[serde(transparent)]
/// struct Meters(f64);
///
/// impl Shaped for Meters {
///     fn descriptor() -> &'static TypeDescriptor {
///         static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
///         CELL.get_or_init(|| TypeDescriptor::new::<Self>(Shape::Scalar(ScalarKind::F64)))
///     }
/// }
///
/// assert!(Meters::descriptor().shape().is_scalar());
/// ```
pub trait Shaped: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Returns the descriptor of `Self`.
    fn descriptor() -> &'static TypeDescriptor;
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// Identity and shape of a type.
pub struct TypeDescriptor {
    type_id: TypeId,
    type_path: &'static str,
    shape: Shape,
    constructor: Option<ConstructorFn>,
}

impl TypeDescriptor {
    /// Creates a descriptor for `T` without a default constructor.
    #[inline]
    pub fn new<T: 'static>(shape: Shape) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            shape,
            constructor: None,
        }
    }

    /// Attaches `T::default` as the constructor.
    ///
    /// `T` should be the type this descriptor was created for.
    #[inline]
    pub fn with_default<T: Default + Send + 'static>(mut self) -> Self {
        self.constructor = Some(construct_default::<T>);
        self
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The full type path, as given by [`core::any::type_name`].
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns `true` if the descriptor carries a default constructor.
    #[inline]
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Builds a default value, if a constructor is attached.
    pub fn construct(&self) -> Option<Box<dyn Any + Send>> {
        self.constructor.map(|f| f())
    }

    /// Returns `true` if this describes `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

fn construct_default<T: Default + Send + 'static>() -> Box<dyn Any + Send> {
    Box::new(T::default())
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_path", &self.type_path)
            .field("shape", &self.shape)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
