//! LLVM detection through `llvm-config`.
//!
//! LLVM support is optional. When the user turns it off, or `llvm-config`
//! is not on the search path, the build continues without it.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::platform::{OsFamily, Platform};
use crate::errors::{ConfigError, ConfigResult};
use crate::util::process::Toolbox;

/// Name of the descriptor tool.
pub const LLVM_CONFIG: &str = "llvm-config";

/// Library components every LLVM-enabled build links against.
pub const LLVM_COMPONENTS: &[&str] = &["core", "jit", "native", "asmparser", "instcombine"];

/// Everything `llvm-config` reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LlvmConfig {
    pub bin_dirs: Vec<PathBuf>,
    pub lib_dirs: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    /// `--cppflags`
    pub cpp_flags: Vec<String>,
    /// `--ldflags`
    pub ld_flags: Vec<String>,
    /// `--libs` for [`LLVM_COMPONENTS`], in the order the tool printed them
    pub libs: Vec<String>,
}

/// Outcome of LLVM detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LlvmAvailability {
    Available(LlvmConfig),
    /// Enabled, but `llvm-config` was not found
    ToolMissing,
    /// Turned off with `enable_llvm=no`
    Disabled,
}

impl LlvmAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, LlvmAvailability::Available(_))
    }

    pub fn config(&self) -> Option<&LlvmConfig> {
        match self {
            LlvmAvailability::Available(config) => Some(config),
            _ => None,
        }
    }

    pub fn libs(&self) -> &[String] {
        self.config().map(|c| c.libs.as_slice()).unwrap_or_default()
    }

    pub fn lib_dirs(&self) -> &[PathBuf] {
        self.config().map(|c| c.lib_dirs.as_slice()).unwrap_or_default()
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        self.config()
            .map(|c| c.include_dirs.as_slice())
            .unwrap_or_default()
    }

    pub fn cpp_flags(&self) -> &[String] {
        self.config().map(|c| c.cpp_flags.as_slice()).unwrap_or_default()
    }

    pub fn ld_flags(&self) -> &[String] {
        self.config().map(|c| c.ld_flags.as_slice()).unwrap_or_default()
    }

    pub fn describe(&self) -> &'static str {
        match self {
            LlvmAvailability::Available(_) => "available",
            LlvmAvailability::ToolMissing => "unavailable (llvm-config not found)",
            LlvmAvailability::Disabled => "disabled",
        }
    }
}

/// Detect LLVM.
///
/// A disabled probe never touches the toolbox. A missing `llvm-config` is
/// reported as a warning and [`LlvmAvailability::ToolMissing`]. A query
/// that fails once the tool is found is warned about and left empty.
pub fn probe_llvm(
    enabled: bool,
    platform: &Platform,
    tools: &dyn Toolbox,
) -> ConfigResult<LlvmAvailability> {
    if !enabled {
        tracing::debug!("LLVM support disabled, skipping detection");
        return Ok(LlvmAvailability::Disabled);
    }

    let llvm_config = match tools.locate(LLVM_CONFIG) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(
                "Failed to find {}: {}; building without LLVM",
                LLVM_CONFIG,
                e
            );
            return Ok(LlvmAvailability::ToolMissing);
        }
    };

    if platform.os_family() != OsFamily::Posix {
        return Err(ConfigError::UnsupportedOs {
            what: "LLVM".to_string(),
        });
    }

    tracing::debug!("Found {} at {}", LLVM_CONFIG, llvm_config.display());

    let mut libs_query = vec!["--libs"];
    libs_query.extend_from_slice(LLVM_COMPONENTS);

    let config = LlvmConfig {
        bin_dirs: to_paths(query(tools, &llvm_config, &["--bindir"])),
        lib_dirs: to_paths(query(tools, &llvm_config, &["--libdir"])),
        include_dirs: to_paths(query(tools, &llvm_config, &["--includedir"])),
        cpp_flags: query(tools, &llvm_config, &["--cppflags"]),
        ld_flags: query(tools, &llvm_config, &["--ldflags"]),
        libs: query(tools, &llvm_config, &libs_query),
    };

    tracing::debug!("LLVM libraries: {}", config.libs.join(" "));

    Ok(LlvmAvailability::Available(config))
}

/// Run one query. A query that cannot be run contributes nothing.
fn query(tools: &dyn Toolbox, llvm_config: &Path, args: &[&str]) -> Vec<String> {
    match tools.run(llvm_config, args) {
        Ok(out) => out.tokens(),
        Err(e) => {
            tracing::warn!("`{} {}` failed: {:#}", LLVM_CONFIG, args.join(" "), e);
            Vec::new()
        }
    }
}

fn to_paths(tokens: Vec<String>) -> Vec<PathBuf> {
    tokens.into_iter().map(PathBuf::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{llvm_tools, posix_x86_64, MockTools};

    #[test]
    fn test_disabled_does_not_probe() {
        let tools = llvm_tools();
        let result = probe_llvm(false, &posix_x86_64(), &tools).unwrap();

        assert_eq!(result, LlvmAvailability::Disabled);
        assert!(tools.calls().is_empty());
    }

    #[test]
    fn test_missing_tool_is_degraded_not_fatal() {
        let tools = MockTools::new();
        let result = probe_llvm(true, &posix_x86_64(), &tools).unwrap();

        assert_eq!(result, LlvmAvailability::ToolMissing);
        assert!(!result.is_available());
        assert!(result.libs().is_empty());
        assert!(result.lib_dirs().is_empty());
        assert!(result.cpp_flags().is_empty());
    }

    #[test]
    fn test_available_parses_every_query() {
        let tools = llvm_tools();
        let result = probe_llvm(true, &posix_x86_64(), &tools).unwrap();

        let config = result.config().unwrap();
        assert_eq!(config.bin_dirs, [PathBuf::from("/usr/lib/llvm/bin")]);
        assert_eq!(config.lib_dirs, [PathBuf::from("/usr/lib/llvm/lib")]);
        assert_eq!(config.include_dirs, [PathBuf::from("/usr/lib/llvm/include")]);
        assert_eq!(config.cpp_flags, ["-I/usr/lib/llvm/include", "-D_GNU_SOURCE"]);
        assert_eq!(config.ld_flags, ["-L/usr/lib/llvm/lib"]);
        assert_eq!(config.libs, ["-lLLVMCore", "-lLLVMJIT", "-lLLVMSupport"]);
        assert_eq!(tools.calls().len(), 6);
    }

    #[test]
    fn test_failed_queries_leave_lists_empty() {
        let mut tools = MockTools::new();
        tools
            .install("llvm-config", "/usr/bin/llvm-config")
            .respond("llvm-config --libdir", "/opt/llvm/lib\n");

        let result = probe_llvm(true, &posix_x86_64(), &tools).unwrap();

        assert!(result.is_available());
        assert_eq!(result.lib_dirs(), [PathBuf::from("/opt/llvm/lib")]);
        assert!(result.include_dirs().is_empty());
        assert!(result.cpp_flags().is_empty());
        assert!(result.ld_flags().is_empty());
        assert!(result.libs().is_empty());
        assert_eq!(tools.calls().len(), 6);
    }

    #[test]
    fn test_found_on_non_posix_is_unsupported() {
        let tools = llvm_tools();
        let windows = Platform::new(OsFamily::Windows, "x86_64");

        let err = probe_llvm(true, &windows, &tools).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedOs { .. }));
        assert!(tools.calls().is_empty());
    }
}
