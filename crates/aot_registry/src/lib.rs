//! Ahead-of-time registration of text serializer bindings.
//!
//! The serialization engine never builds per-type logic on demand. Every
//! type it may read or write, together with every type reachable from it,
//! is registered up front: [`TypeRegistry::register_closure`] walks a
//! root's [`TypeDescriptor`] graph and records one [`SerializerBinding`]
//! per type and [`WireFormat`]. Each binding is a pair of monomorphized
//! function pointers, so registering a type is what forces its code into
//! the binary.
//!
//! ## Shapes
//!
//! Types describe themselves through [`Shaped`]. It is implemented for the
//! scalar types, `Option`, `Box`, `Arc`, the standard sequences and maps,
//! and derived for user records:
//!
//! ```
//! use aot_registry::{Shaped, TypeRegistry, WireFormat};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Shaped, Serialize, Deserialize)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     label: Option<String>,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_closure::<Point>().unwrap();
//!
//! // The root and everything it reaches.
//! assert!(registry.contains_type::<Point>());
//! assert!(registry.contains_type::<Option<String>>());
//! assert!(registry.contains_type::<String>());
//!
//! let binding = registry.require_binding::<Point>(WireFormat::Json).unwrap();
//! let p: Point = binding.parse_as(r#"{"x":1,"y":2,"label":null}"#).unwrap();
//! assert_eq!((p.x, p.y), (1, 2));
//! ```
//!
//! ## auto_register
//!
//! With the `auto_register` feature, records marked `#[shaped(auto_register)]`
//! or listed with [`impl_auto_register!`](derive::impl_auto_register) are
//! registered by [`TypeRegistry::auto_register`].
//!
//! ## Abstract types
//!
//! Trait objects can be registered with [`TypeRegistry::register_abstract`]
//! and materialized through an [`Instantiator`](instantiate::Instantiator)
//! when a proxy backend is available.

// Allow the derive output to name `::aot_registry` inside this crate.
extern crate self as aot_registry;

// -----------------------------------------------------------------------------
// Modules

mod binding;
mod builtins;
mod error;
mod format;
mod impls;
mod registry;
mod shared;

pub mod descriptor;
pub mod instantiate;

pub mod derive {
    //! Re-exports of the derive macros.
    pub use aot_registry_derive::{Shaped, impl_auto_register};
}

// -----------------------------------------------------------------------------
// Exports

pub use binding::{ParseFn, SerializerBinding, WriteFn, parse_value, write_value};
pub use builtins::BuiltinProbe;
pub use descriptor::{Shaped, TypeDescriptor};
pub use error::{CodecError, ConfigurationError, Operation};
pub use format::{JsonFormat, RonFormat, TextFormat, WireFormat};
pub use registry::{Registrar, TypeRegistry};
pub use shared::{FrozenRegistry, SharedRegistry};

pub use aot_registry_derive::Shaped;

// -----------------------------------------------------------------------------
// Macro exports

#[doc(hidden)]
pub mod __macro_exports;

aot_os::declare_module!();
