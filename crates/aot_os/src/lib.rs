//! Platform capabilities consumed by the serialization engine.
//!
//! - [`platform`]: file-system access, path resolution and module listing.
//! - [`time`]: XSD date-time rendering and the fixed date-time profile parser.
//! - [`sync`]: synchronization primitives shared by the registries.

// -----------------------------------------------------------------------------
// Modules

pub mod platform;
pub mod sync;
pub mod time;

// -----------------------------------------------------------------------------
// Macro exports

#[doc(hidden)]
pub mod __macro_exports {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}

crate::declare_module!();
