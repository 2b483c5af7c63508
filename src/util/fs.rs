//! Path helpers.

use std::path::{Component, Path, PathBuf};

use crate::errors::{ConfigError, ConfigResult};

/// The process working directory, which is the build directory.
pub fn current_dir() -> ConfigResult<PathBuf> {
    std::env::current_dir().map_err(|source| ConfigError::Io {
        context: "failed to read the current directory".to_string(),
        source,
    })
}

/// Make `path` absolute against `cwd` and normalize it lexically.
///
/// `.` components are dropped and `..` pops the previous component.
/// Symlinks are not resolved and the path does not need to exist.
pub fn absolutize(path: impl AsRef<Path>, cwd: &Path) -> PathBuf {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    normalize(&joined)
}

/// Lexically normalize a path without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// The parent of `dir`, or `dir` itself at the root.
pub fn parent_or_self(dir: &Path) -> PathBuf {
    dir.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_absolutize_keeps_absolute_paths() {
        let cwd = Path::new("/work/ocelot/build");
        assert_eq!(absolutize("/custom/path", cwd), PathBuf::from("/custom/path"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolutize_joins_relative_paths() {
        let cwd = Path::new("/work/ocelot/build");
        assert_eq!(
            absolutize("../deps/./boost", cwd),
            PathBuf::from("/work/ocelot/deps/boost")
        );
        assert_eq!(absolutize(".", cwd), PathBuf::from("/work/ocelot/build"));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_does_not_escape_root() {
        assert_eq!(normalize(Path::new("/../usr//lib/")), PathBuf::from("/usr/lib"));
    }

    #[cfg(unix)]
    #[test]
    fn test_parent_or_self() {
        assert_eq!(
            parent_or_self(Path::new("/work/ocelot/build")),
            PathBuf::from("/work/ocelot")
        );
        assert_eq!(parent_or_self(Path::new("/")), PathBuf::from("/"));
    }
}
