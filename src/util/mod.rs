//! Shared utilities

pub mod config;
pub mod env;
pub mod fs;
pub mod process;

pub use config::OptionsFile;
pub use env::EnvVars;
pub use process::{SystemTools, ToolLocator, ToolRunner, Toolbox};
