//! Default instantiation of registered types, including abstract ones.
//!
//! Concrete types are built through their descriptor's default
//! constructor. Abstract types (trait objects recorded with
//! [`TypeRegistry::register_abstract`]) have no constructor of their own;
//! they are handed to a [`ProxyFactory`] when the host offers one.

use core::any::{Any, TypeId, type_name};
use core::fmt;

use aot_os::sync::Arc;
use aot_utils::TypeIdMap;
use thiserror::Error;

use crate::registry::TypeRegistry;

/// Builds a boxed value.
pub type StandInFn = fn() -> Box<dyn Any + Send>;

// -----------------------------------------------------------------------------
// Errors

/// A type cannot be materialized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum UnsupportedTypeError {
    #[error("type {type_id:?} is not registered")]
    Unregistered { type_id: TypeId },

    #[error("`{type_path}` has no default constructor")]
    NotConstructible { type_path: &'static str },

    #[error("`{type_path}` is abstract and no proxy capability is available")]
    ProxyUnavailable { type_path: &'static str },

    #[error("proxy factory has no stand-in for `{type_path}`")]
    NoStandIn { type_path: &'static str },
}

// -----------------------------------------------------------------------------
// Proxy capability

/// Produces stand-in values for abstract types.
pub trait ProxyFactory: Send + Sync {
    /// Returns a stand-in for the abstract type, or `None` if unsupported.
    fn create(&self, type_id: TypeId, type_path: &'static str) -> Option<Box<dyn Any + Send>>;
}

/// Whether the host can build stand-ins for abstract types.
#[derive(Clone, Default)]
pub enum ProxyCapability {
    Available(Arc<dyn ProxyFactory>),
    #[default]
    Unavailable,
}

impl ProxyCapability {
    pub fn available(factory: impl ProxyFactory + 'static) -> Self {
        Self::Available(Arc::new(factory))
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl fmt::Debug for ProxyCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(_) => f.write_str("Available(..)"),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

// -----------------------------------------------------------------------------
// StandInFactory

/// [`ProxyFactory`] backed by registered stand-in constructors.
///
/// By convention the stand-in for `dyn Trait` is a boxed
/// `Box<dyn Trait + Send>`.
///
/// ```
/// use core::any::TypeId;
/// use aot_registry::TypeRegistry;
/// use aot_registry::instantiate::{Instantiator, ProxyCapability, StandInFactory};
///
/// trait Greeter: Send {
///     fn greet(&self) -> String;
/// }
///
/// struct Silent;
/// impl Greeter for Silent {
///     fn greet(&self) -> String {
///         String::new()
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register_abstract::<dyn Greeter>();
///
/// let mut factory = StandInFactory::new();
/// factory.register_stand_in::<dyn Greeter>(|| Box::new(Box::new(Silent) as Box<dyn Greeter + Send>));
///
/// let instantiator = Instantiator::new(&registry, ProxyCapability::available(factory));
/// let value = instantiator.materialize(TypeId::of::<dyn Greeter>()).unwrap();
/// let greeter = value.downcast::<Box<dyn Greeter + Send>>().unwrap();
/// assert_eq!(greeter.greet(), "");
/// ```
#[derive(Default, Clone)]
pub struct StandInFactory {
    stand_ins: TypeIdMap<StandInFn>,
}

impl StandInFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stand-in constructor for `T`, replacing any previous one.
    pub fn register_stand_in<T: ?Sized + 'static>(&mut self, f: StandInFn) -> &mut Self {
        if self.stand_ins.insert(TypeId::of::<T>(), f).is_some() {
            log::debug!("stand-in for `{}` replaced", type_name::<T>());
        }
        self
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.stand_ins.contains(&type_id)
    }
}

impl ProxyFactory for StandInFactory {
    fn create(&self, type_id: TypeId, _: &'static str) -> Option<Box<dyn Any + Send>> {
        self.stand_ins.get(&type_id).map(|f| f())
    }
}

// -----------------------------------------------------------------------------
// Instantiator

/// Builds default values of registered types.
pub struct Instantiator<'a> {
    registry: &'a TypeRegistry,
    proxy: ProxyCapability,
}

impl<'a> Instantiator<'a> {
    pub fn new(registry: &'a TypeRegistry, proxy: ProxyCapability) -> Self {
        Self { registry, proxy }
    }

    #[inline]
    pub fn proxy(&self) -> &ProxyCapability {
        &self.proxy
    }

    /// Creates a default value of the type with the given id.
    ///
    /// Concrete types use their default constructor. Abstract types are
    /// delegated to the proxy capability.
    pub fn materialize(&self, type_id: TypeId) -> Result<Box<dyn Any + Send>, UnsupportedTypeError> {
        if let Some(descriptor) = self.registry.get_descriptor(type_id) {
            return descriptor
                .construct()
                .ok_or(UnsupportedTypeError::NotConstructible {
                    type_path: descriptor.type_path(),
                });
        }

        let Some(type_path) = self.registry.get_abstract(type_id) else {
            return Err(UnsupportedTypeError::Unregistered { type_id });
        };

        match &self.proxy {
            ProxyCapability::Available(factory) => factory
                .create(type_id, type_path)
                .ok_or(UnsupportedTypeError::NoStandIn { type_path }),
            ProxyCapability::Unavailable => {
                log::warn!("cannot materialize abstract `{type_path}` without a proxy capability");
                Err(UnsupportedTypeError::ProxyUnavailable { type_path })
            }
        }
    }

    /// [`materialize`](Self::materialize) for `T`.
    #[inline]
    pub fn materialize_type<T: ?Sized + 'static>(
        &self,
    ) -> Result<Box<dyn Any + Send>, UnsupportedTypeError> {
        self.materialize(TypeId::of::<T>())
    }
}

// -----------------------------------------------------------------------------
// Tests
