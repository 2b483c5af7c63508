//! Toolchain identity selection.

use serde::Serialize;

use crate::core::options::BuildOptions;
use crate::core::platform::{OsFamily, Platform};
use crate::errors::{ConfigError, ConfigResult};

use super::{CompilerIdentity, LinkerIdentity};

/// The compilers and linker the build will use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolchainIdentity {
    pub cc: CompilerIdentity,
    pub cxx: CompilerIdentity,
    pub link: LinkerIdentity,
}

impl ToolchainIdentity {
    /// Default toolchain for a host OS family.
    pub fn host_default(platform: &Platform) -> ConfigResult<Self> {
        match platform.os_family() {
            OsFamily::Posix => Ok(ToolchainIdentity {
                cc: CompilerIdentity::Gcc,
                cxx: CompilerIdentity::Gxx,
                link: LinkerIdentity::Gxx,
            }),
            OsFamily::Windows => Ok(ToolchainIdentity {
                cc: CompilerIdentity::Cl,
                cxx: CompilerIdentity::Cl,
                link: LinkerIdentity::Link,
            }),
            OsFamily::Unknown => Err(ConfigError::UnsupportedOs {
                what: "a C/C++ toolchain".to_string(),
            }),
        }
    }
}

/// Determine the effective compiler and linker identities.
///
/// A program named by the `CC` / `CXX` / `LINK` build options wins over
/// the host default (gcc, g++, g++ on POSIX; cl, cl, link on Windows).
/// `CC` and friends in the process environment are not consulted.
pub fn detect_toolchain(
    options: &BuildOptions,
    platform: &Platform,
) -> ConfigResult<ToolchainIdentity> {
    // Only consulted for programs nobody named, so an unknown host with
    // a fully explicit toolchain still resolves.
    let host = || ToolchainIdentity::host_default(platform);

    let identity = ToolchainIdentity {
        cc: match options.cc.as_deref() {
            Some(program) => CompilerIdentity::from_program(program)?,
            None => host()?.cc,
        },
        cxx: match options.cxx.as_deref() {
            Some(program) => CompilerIdentity::from_program(program)?,
            None => host()?.cxx,
        },
        link: match options.link.as_deref() {
            Some(program) => LinkerIdentity::from_program(program)?,
            None => host()?.link,
        },
    };

    tracing::debug!(
        "toolchain: CC={} CXX={} LINK={}",
        identity.cc,
        identity.cxx,
        identity.link
    );

    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::posix_x86_64;

    #[test]
    fn test_host_defaults() {
        let posix = detect_toolchain(&BuildOptions::default(), &posix_x86_64()).unwrap();
        assert_eq!(posix.cc, CompilerIdentity::Gcc);
        assert_eq!(posix.cxx, CompilerIdentity::Gxx);
        assert_eq!(posix.link, LinkerIdentity::Gxx);

        let windows = Platform::new(OsFamily::Windows, "x86");
        let win = detect_toolchain(&BuildOptions::default(), &windows).unwrap();
        assert_eq!(win.cc, CompilerIdentity::Cl);
        assert_eq!(win.cxx, CompilerIdentity::Cl);
        assert_eq!(win.link, LinkerIdentity::Link);
    }

    #[test]
    fn test_options_override_host_default() {
        let options = BuildOptions {
            cxx: Some("/usr/bin/gcc".into()),
            link: Some("gcc".into()),
            ..BuildOptions::default()
        };

        let tc = detect_toolchain(&options, &posix_x86_64()).unwrap();
        assert_eq!(tc.cc, CompilerIdentity::Gcc);
        assert_eq!(tc.cxx, CompilerIdentity::Gcc);
        assert_eq!(tc.link, LinkerIdentity::Gcc);
    }

    #[test]
    fn test_unknown_compiler_option_is_fatal() {
        let options = BuildOptions {
            cc: Some("clang".into()),
            ..BuildOptions::default()
        };
        let err = detect_toolchain(&options, &posix_x86_64()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCompiler { name } if name == "clang"));
    }

    #[test]
    fn test_unknown_host_needs_explicit_toolchain() {
        let unknown = Platform::new(OsFamily::Unknown, "riscv64");
        assert!(matches!(
            detect_toolchain(&BuildOptions::default(), &unknown),
            Err(ConfigError::UnsupportedOs { .. })
        ));

        let options = BuildOptions {
            cc: Some("gcc".into()),
            cxx: Some("g++".into()),
            link: Some("gcc".into()),
            ..BuildOptions::default()
        };
        let tc = detect_toolchain(&options, &unknown).unwrap();
        assert_eq!(tc.link, LinkerIdentity::Gcc);
    }
}
