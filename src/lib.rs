//! Ocelot build configuration resolver.
//!
//! Turns user options, the host platform, environment overrides and a few
//! external descriptor tools (`llvm-config`, `svn`, `dpkg-architecture`)
//! into one immutable [`ResolvedConfiguration`]: compiler and linker
//! identities, ordered compile and link flags, dependency locations, the
//! version string and install metadata.
//!
//! Every input is passed in explicitly; nothing is read from process-wide
//! state after the entry point has captured it.

pub mod core;
pub mod deps;
pub mod errors;
pub mod ops;
pub mod toolchain;
pub mod util;

/// Test utilities and mocks for unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildMode, BuildOptions, OsFamily, PathTriple, Platform, TestLevel, WarningPolicy};
pub use deps::{Dependency, DependencyPaths, LlvmAvailability};
pub use errors::{ConfigError, ConfigResult};
pub use ops::{ConfigurationBuilder, ResolvedConfiguration};
pub use toolchain::{CompilerIdentity, LinkerIdentity, ToolchainIdentity};
pub use util::{EnvVars, OptionsFile, SystemTools};
