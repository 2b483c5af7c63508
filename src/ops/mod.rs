//! High-level operations.
//!
//! This module contains the resolution steps behind the `ocelot-config`
//! commands.

pub mod configure;
pub mod packaging;
pub mod version;

pub use configure::{ConfigurationBuilder, ResolvedConfiguration};
pub use packaging::debian_architecture;
pub use version::{parse_revision, resolve_version, BASE_VERSION};
