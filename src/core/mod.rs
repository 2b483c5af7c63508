//! Core data types shared by every resolver.

pub mod options;
pub mod paths;
pub mod platform;

pub use options::{BuildMode, BuildOptions, MsvcVersion, TestLevel, WarningPolicy};
pub use paths::{PathComponent, PathSlot, PathTriple};
pub use platform::{OsFamily, Platform};
