use std::path::{Component, Path, PathBuf};

/// Marker that stands for the application base directory.
const HOME_MARKER: char = '~';

/// Resolves `relative` against `base` if it starts with `~`.
///
/// Only a leading `~` is replaced. The result is `base/modifier/rest`,
/// lexically normalized. Paths without the marker are returned as given.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use aot_os::platform::resolve_home_relative;
///
/// let path = resolve_home_relative(Path::new("/srv/bin"), "~/config.json", Some("../etc"));
/// assert_eq!(path, Path::new("/srv/etc/config.json"));
///
/// let path = resolve_home_relative(Path::new("/srv/bin"), "data/a~b", None);
/// assert_eq!(path, Path::new("data/a~b"));
/// ```
pub fn resolve_home_relative(base: &Path, relative: &str, modifier: Option<&str>) -> PathBuf {
    let Some(rest) = relative.strip_prefix(HOME_MARKER) else {
        return PathBuf::from(relative);
    };

    let mut host = base.to_path_buf();
    if let Some(modifier) = modifier {
        let modifier = modifier.trim_start_matches(is_separator);
        if !modifier.is_empty() {
            host.push(modifier);
        }
    }

    let rest = rest.trim_start_matches(is_separator);
    if !rest.is_empty() {
        host.push(rest);
    }

    normalize_path(&host)
}

/// Collapses `.` and `..` without touching the file system.
///
/// Relative inputs are made absolute against the current directory first.
/// `..` above the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute;
    let path = if path.is_absolute() {
        path
    } else {
        absolute = std::env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf());
        &absolute
    };

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to remove the root.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[inline]
fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

#[cfg(test)]
mod tests {
    use super::{normalize_path, resolve_home_relative};
    use std::path::Path;

    #[test]
    fn marker_maps_to_base_and_modifier() {
        let base = Path::new("/opt/app/bin");
        assert_eq!(
            resolve_home_relative(base, "~/config.json", Some("MyApp")),
            Path::new("/opt/app/bin/MyApp/config.json"),
        );
        assert_eq!(
            resolve_home_relative(base, "~config.json", None),
            Path::new("/opt/app/bin/config.json"),
        );
        assert_eq!(
            resolve_home_relative(base, "~/../shared/./x.txt", Some("/sub")),
            Path::new("/opt/app/bin/shared/x.txt"),
        );
    }

    #[test]
    fn only_leading_marker_is_replaced() {
        let base = Path::new("/opt/app");
        assert_eq!(resolve_home_relative(base, "a/~/b", None), Path::new("a/~/b"));
        assert_eq!(resolve_home_relative(base, "/abs/~", None), Path::new("/abs/~"));
    }

    #[test]
    fn parent_does_not_escape_root() {
        assert_eq!(normalize_path(Path::new("/../../a")), Path::new("/a"));
        assert_eq!(normalize_path(Path::new("/a/b/../c/.")), Path::new("/a/c"));
    }
}
