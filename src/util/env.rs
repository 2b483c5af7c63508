//! Snapshot of the process environment.
//!
//! Resolvers take an [`EnvVars`] by reference instead of calling
//! `std::env::var`, so a whole resolution can be replayed with a fixed
//! environment.

use std::collections::BTreeMap;

/// Immutable view of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: BTreeMap<String, String>,
}

impl EnvVars {
    /// An empty environment.
    pub fn empty() -> Self {
        EnvVars::default()
    }

    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn capture() -> Self {
        EnvVars {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Return a copy with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for EnvVars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        EnvVars {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let env: EnvVars = [("CUDA_BIN_PATH", "/opt/cuda/bin")].into_iter().collect();
        assert_eq!(env.get("CUDA_BIN_PATH"), Some("/opt/cuda/bin"));
        assert_eq!(env.get("CUDA_LIB_PATH"), None);
    }

    #[test]
    fn test_with_overrides_existing() {
        let env = EnvVars::empty().with("CC", "gcc").with("CC", "cl");
        assert_eq!(env.get("CC"), Some("cl"));
    }
}
