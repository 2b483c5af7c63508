//! Debian package architecture lookup.

use crate::core::platform::{OsFamily, Platform};
use crate::errors::{ConfigError, ConfigResult};
use crate::util::process::Toolbox;

const DPKG_ARCHITECTURE: &str = "dpkg-architecture";

/// Query passed to `dpkg-architecture -c`.
const ARCH_QUERY: &str = "echo $DEB_BUILD_ARCH";

/// Resolve the Debian build architecture (e.g. `amd64`).
///
/// Every failure here is fatal: a `debian` target cannot be built
/// without an architecture.
pub fn debian_architecture(platform: &Platform, tools: &dyn Toolbox) -> ConfigResult<String> {
    if platform.os_family() != OsFamily::Posix {
        return Err(ConfigError::packaging(
            "unknown OS: can only build .deb on linux",
        ));
    }

    let dpkg = tools
        .locate(DPKG_ARCHITECTURE)
        .map_err(|_| ConfigError::packaging(format!("failed to find {}", DPKG_ARCHITECTURE)))?;

    let output = tools
        .run(&dpkg, &["-c", ARCH_QUERY])
        .map_err(|e| ConfigError::tool(DPKG_ARCHITECTURE, e))?;

    let arch = output.tokens().into_iter().next().ok_or_else(|| {
        ConfigError::packaging(format!(
            "failed to get architecture from {}",
            DPKG_ARCHITECTURE
        ))
    })?;

    tracing::debug!("Debian architecture: {}", arch);
    Ok(arch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{posix_x86_64, MockTools};

    #[test]
    fn test_architecture_token() {
        let mut tools = MockTools::new();
        tools
            .install("dpkg-architecture", "/usr/bin/dpkg-architecture")
            .respond("dpkg-architecture -c echo $DEB_BUILD_ARCH", "amd64\n");

        assert_eq!(debian_architecture(&posix_x86_64(), &tools).unwrap(), "amd64");
    }

    #[test]
    fn test_windows_cannot_package() {
        let tools = MockTools::new();
        let windows = Platform::new(OsFamily::Windows, "x86_64");
        let err = debian_architecture(&windows, &tools).unwrap_err();
        assert!(err.to_string().contains("can only build .deb on linux"));
    }

    #[test]
    fn test_missing_tool_is_fatal() {
        let tools = MockTools::new();
        let err = debian_architecture(&posix_x86_64(), &tools).unwrap_err();
        assert_eq!(err.to_string(), "failed to find dpkg-architecture");
    }

    #[test]
    fn test_empty_output_is_fatal() {
        let mut tools = MockTools::new();
        tools
            .install("dpkg-architecture", "/usr/bin/dpkg-architecture")
            .respond("dpkg-architecture -c echo $DEB_BUILD_ARCH", "\n");

        let err = debian_architecture(&posix_x86_64(), &tools).unwrap_err();
        assert!(matches!(err, ConfigError::Packaging { .. }));
    }
}
