use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};

use super::{LoadedModule, Platform, PlatformError, loaded_modules, resolve_home_relative};

// -----------------------------------------------------------------------------
// StdPlatform

/// [`Platform`] backed by `std::fs`.
///
/// The base directory used by [`Platform::resolve_path`] defaults to the
/// directory of the running executable, then the current directory.
#[derive(Debug, Clone)]
pub struct StdPlatform {
    base_dir: PathBuf,
}

impl StdPlatform {
    /// Creates a platform with the detected application base directory.
    pub fn new() -> Self {
        let base_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { base_dir }
    }

    /// Creates a platform with an explicit base directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The directory `~` resolves to.
    #[inline]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn list_entries(
        &self,
        dir: &Path,
        pattern: Option<&str>,
        want_dirs: bool,
    ) -> Result<Vec<PathBuf>, PlatformError> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let matcher = pattern.map(compile_pattern).transpose()?;

        let read_dir = fs::read_dir(dir).map_err(|e| PlatformError::io(dir, e))?;

        let mut out = Vec::new();
        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("skipping unreadable entry in {}: {e}", dir.display());
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    log::warn!("skipping {}: {e}", entry.path().display());
                    continue;
                }
            };
            // Symlinks are followed through `Path::is_dir`.
            let is_dir = if file_type.is_symlink() {
                entry.path().is_dir()
            } else {
                file_type.is_dir()
            };
            if is_dir != want_dirs {
                continue;
            }
            if let Some(matcher) = &matcher
                && !matcher.is_match(entry.file_name())
            {
                continue;
            }
            out.push(entry.path());
        }

        out.sort();
        Ok(out)
    }
}

impl Default for StdPlatform {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher, PlatformError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| PlatformError::InvalidPattern {
            pattern: pattern.to_owned(),
            message: e.kind().to_string(),
        })
}

impl Platform for StdPlatform {
    fn name(&self) -> &'static str {
        "std"
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_directory(&self, path: &Path) -> Result<(), PlatformError> {
        fs::create_dir_all(path).map_err(|e| PlatformError::io(path, e))
    }

    fn read_all_text(&self, path: &Path) -> Result<String, PlatformError> {
        fs::read_to_string(path).map_err(|e| PlatformError::io(path, e))
    }

    fn list_files(&self, dir: &Path, pattern: Option<&str>) -> Result<Vec<PathBuf>, PlatformError> {
        self.list_entries(dir, pattern, false)
    }

    fn list_directories(
        &self,
        dir: &Path,
        pattern: Option<&str>,
    ) -> Result<Vec<PathBuf>, PlatformError> {
        self.list_entries(dir, pattern, true)
    }

    fn resolve_path(&self, relative: &str, modifier: Option<&str>) -> PathBuf {
        resolve_home_relative(&self.base_dir, relative, modifier)
    }

    fn loaded_modules(&self) -> Vec<&'static LoadedModule> {
        loaded_modules()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::StdPlatform;
    use crate::platform::{Platform, PlatformError};
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::create_dir(dir.path().join("cache")).unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        dir
    }

    #[test]
    fn resolve_path_uses_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let platform = StdPlatform::with_base_dir(dir.path());
        assert_eq!(
            platform.resolve_path("~/config.json", Some("MyApp")),
            dir.path().join("MyApp").join("config.json"),
        );
    }

    #[test]
    fn missing_paths_are_not_errors() {
        let dir = tempfile::tempdir().unwrap();
        let platform = StdPlatform::with_base_dir(dir.path());
        let missing = dir.path().join("nope");

        assert!(!platform.file_exists(&missing));
        assert!(!platform.directory_exists(&missing));
        assert!(platform.list_files(&missing, None).unwrap().is_empty());
        assert!(platform.list_directories(&missing, Some("*")).unwrap().is_empty());
        assert!(matches!(
            platform.read_all_text(&missing),
            Err(PlatformError::NotFound { .. })
        ));
    }

    #[test]
    fn listing_filters_by_glob() {
        let dir = fixture();
        let platform = StdPlatform::with_base_dir(dir.path());

        let json = platform.list_files(dir.path(), Some("*.json")).unwrap();
        assert_eq!(json, vec![dir.path().join("a.json"), dir.path().join("b.json")]);

        let all = platform.list_files(dir.path(), None).unwrap();
        assert_eq!(all.len(), 3);

        let dirs = platform.list_directories(dir.path(), Some("c?che")).unwrap();
        assert_eq!(dirs, vec![dir.path().join("cache")]);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let dir = fixture();
        let platform = StdPlatform::with_base_dir(dir.path());
        let err = platform.list_files(dir.path(), Some("[a-")).unwrap_err();
        assert!(matches!(err, PlatformError::InvalidPattern { .. }));
    }

    #[test]
    fn missing_directory_wins_over_bad_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let platform = StdPlatform::with_base_dir(dir.path());
        let missing = dir.path().join("nope");

        assert!(platform.list_files(&missing, Some("[a-")).unwrap().is_empty());
        assert!(platform.list_directories(&missing, Some("[a-")).unwrap().is_empty());
    }

    #[test]
    fn create_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let platform = StdPlatform::with_base_dir(dir.path());
        let nested = dir.path().join("x").join("y");

        platform.create_directory(&nested).unwrap();
        assert!(platform.directory_exists(&nested));

        let file = nested.join("z.txt");
        fs::write(&file, "line").unwrap();
        assert!(platform.file_exists(&file));
        assert_eq!(platform.read_all_text(&file).unwrap(), "line");
    }
}
