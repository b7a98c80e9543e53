//! Narrow file-system and host abstraction used by the serialization engine.
//!
//! The engine never touches `std::fs` directly; it goes through a
//! [`Platform`] so hosts without a file system can plug in their own.
//! [`StdPlatform`] is the pass-through implementation.
//!
//! Missing paths are never errors here: existence checks answer `false`
//! and listings answer an empty list. The one exception is
//! [`Platform::read_all_text`], which reports [`PlatformError::NotFound`].

// -----------------------------------------------------------------------------
// Modules

mod error;
mod module;
mod path;
mod std_platform;

// -----------------------------------------------------------------------------
// Exports

pub use error::PlatformError;
pub use module::{LoadedModule, loaded_modules};
pub use path::{normalize_path, resolve_home_relative};
pub use std_platform::StdPlatform;

use std::path::{Path, PathBuf};

// -----------------------------------------------------------------------------
// Platform

/// Host capabilities the engine depends on.
pub trait Platform: Send + Sync {
    /// A short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns `true` if `path` is an existing regular file.
    fn file_exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is an existing directory.
    fn directory_exists(&self, path: &Path) -> bool;

    /// Creates `path` and any missing parents.
    fn create_directory(&self, path: &Path) -> Result<(), PlatformError>;

    /// Reads a whole UTF-8 file.
    ///
    /// A missing file is reported as [`PlatformError::NotFound`].
    fn read_all_text(&self, path: &Path) -> Result<String, PlatformError>;

    /// Lists files directly inside `dir`, optionally filtered by a glob
    /// matched against the file name. A missing `dir` yields an empty list.
    fn list_files(&self, dir: &Path, pattern: Option<&str>) -> Result<Vec<PathBuf>, PlatformError>;

    /// Lists sub-directories directly inside `dir`, optionally filtered by a
    /// glob matched against the directory name. A missing `dir` yields an empty list.
    fn list_directories(
        &self,
        dir: &Path,
        pattern: Option<&str>,
    ) -> Result<Vec<PathBuf>, PlatformError>;

    /// Maps a `~`-prefixed path onto the application base directory.
    ///
    /// `modifier` is appended to the base directory before the rest of the
    /// path, e.g. to step out of a build output folder. Paths without the
    /// marker are returned unchanged.
    fn resolve_path(&self, relative: &str, modifier: Option<&str>) -> PathBuf;

    /// Modules linked into this binary that declared themselves with
    /// [`declare_module!`](crate::declare_module).
    fn loaded_modules(&self) -> Vec<&'static LoadedModule>;

    /// Emits a diagnostic line.
    fn write_line(&self, line: &str) {
        log::debug!(target: "aot_os::platform", "{line}");
    }
}
