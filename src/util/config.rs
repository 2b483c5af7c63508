//! Options file support.
//!
//! Build options can be stored in two places:
//! - Global: `~/.ocelot/options.toml` - User-wide defaults
//! - Project: `.ocelot/options.toml` - Project-specific overrides
//!
//! Project options take precedence over global options, and `KEY=VALUE`
//! assignments on the command line take precedence over both.
//!
//! ```toml
//! [options]
//! mode = "debug"
//! Werror = false
//! install_path = "/opt/ocelot"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Contents of an options file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsFile {
    /// Option assignments, keyed by option name
    pub options: BTreeMap<String, toml::Value>,
}

impl OptionsFile {
    /// Load an options file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read options file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse options file: {}", path.display()))
    }

    /// Load an options file with fallback to empty if it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load options from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another file into this one (other takes precedence).
    pub fn merge(&mut self, other: OptionsFile) {
        self.options.extend(other.options);
    }

    /// Option assignments as `(key, value)` strings.
    ///
    /// Strings are taken verbatim, booleans and numbers use their TOML
    /// spelling, so `Wall = false` and `Wall = "no"` mean the same thing.
    pub fn assignments(&self) -> Vec<(String, String)> {
        self.options
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect()
    }
}

/// Load merged options from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project options (.ocelot/options.toml)
/// 2. Global options (~/.ocelot/options.toml)
pub fn load_options(global_path: Option<&Path>, project_path: &Path) -> OptionsFile {
    let mut options = OptionsFile::default();

    if let Some(global) = global_path {
        options.merge(OptionsFile::load_or_default(global));
    }

    options.merge(OptionsFile::load_or_default(project_path));

    options
}

/// Get the global ocelot config directory (~/.ocelot).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".ocelot"))
}

/// Get the global options path (~/.ocelot/options.toml).
pub fn global_options_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("options.toml"))
}

/// Get the project options path (.ocelot/options.toml).
pub fn project_options_path(source_root: &Path) -> PathBuf {
    source_root.join(".ocelot").join("options.toml")
}
