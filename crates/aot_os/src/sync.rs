//! Synchronization primitives used by the registries.

pub use std::sync::Arc;
pub use std::sync::{OnceLock, PoisonError};
pub use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
