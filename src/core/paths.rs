//! Dependency directory triples.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// One directory of a [`PathTriple`].
///
/// `Unset` means "probed, nothing known", which is different from any
/// path value. There is no third "not probed" state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PathSlot {
    Set(PathBuf),
    #[default]
    Unset,
}

impl PathSlot {
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            PathSlot::Set(p) => Some(p),
            PathSlot::Unset => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, PathSlot::Set(_))
    }
}

impl From<PathBuf> for PathSlot {
    fn from(path: PathBuf) -> Self {
        PathSlot::Set(path)
    }
}

impl From<&str> for PathSlot {
    fn from(path: &str) -> Self {
        PathSlot::Set(PathBuf::from(path))
    }
}

impl fmt::Display for PathSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSlot::Set(p) => write!(f, "{}", p.display()),
            PathSlot::Unset => f.write_str("<unset>"),
        }
    }
}

impl Serialize for PathSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSlot::Set(p) => serializer.serialize_str(&p.to_string_lossy()),
            PathSlot::Unset => serializer.serialize_none(),
        }
    }
}

/// Binary, library and include directories of a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct PathTriple {
    pub binary_dir: PathSlot,
    pub library_dir: PathSlot,
    pub include_dir: PathSlot,
}

impl PathTriple {
    pub fn new(
        binary_dir: impl Into<PathSlot>,
        library_dir: impl Into<PathSlot>,
        include_dir: impl Into<PathSlot>,
    ) -> Self {
        PathTriple {
            binary_dir: binary_dir.into(),
            library_dir: library_dir.into(),
            include_dir: include_dir.into(),
        }
    }

    /// All three directories unset.
    pub fn unset() -> Self {
        PathTriple::default()
    }

    pub fn get(&self, component: PathComponent) -> &PathSlot {
        match component {
            PathComponent::Binary => &self.binary_dir,
            PathComponent::Library => &self.library_dir,
            PathComponent::Include => &self.include_dir,
        }
    }

    pub fn set(&mut self, component: PathComponent, slot: PathSlot) {
        match component {
            PathComponent::Binary => self.binary_dir = slot,
            PathComponent::Library => self.library_dir = slot,
            PathComponent::Include => self.include_dir = slot,
        }
    }
}

/// Selects one member of a [`PathTriple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathComponent {
    Binary,
    Library,
    Include,
}

impl PathComponent {
    pub const ALL: [PathComponent; 3] = [
        PathComponent::Binary,
        PathComponent::Library,
        PathComponent::Include,
    ];

    /// Environment variable suffix, e.g. `BIN_PATH` for `CUDA_BIN_PATH`.
    pub fn env_suffix(&self) -> &'static str {
        match self {
            PathComponent::Binary => "BIN_PATH",
            PathComponent::Library => "LIB_PATH",
            PathComponent::Include => "INC_PATH",
        }
    }
}
