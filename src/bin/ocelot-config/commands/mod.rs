//! Command implementations

pub mod completions;
pub mod deps;
pub mod flags;
pub mod options;
pub mod resolve;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::ConfigArgs;
use ocelot_config::core::{BuildOptions, Platform};
use ocelot_config::util::config::{global_options_path, load_options, project_options_path};
use ocelot_config::util::fs::{absolutize, current_dir, parent_or_self};
use ocelot_config::{ConfigurationBuilder, EnvVars, SystemTools};

/// Process-wide inputs, captured once per invocation.
pub struct Session {
    pub cwd: PathBuf,
    pub source_root: PathBuf,
    pub platform: Platform,
}

impl Session {
    pub fn new(source_root: Option<&Path>) -> Result<Self> {
        let cwd = current_dir()?;
        let source_root = match source_root {
            Some(root) => absolutize(root, &cwd),
            None => parent_or_self(&cwd),
        };

        Ok(Session {
            cwd,
            source_root,
            platform: Platform::host(),
        })
    }

    pub fn tools(&self) -> SystemTools {
        SystemTools::with_cwd(&self.cwd)
    }

    /// Validated options: options files first, then the command line.
    pub fn options(&self, args: &ConfigArgs) -> Result<BuildOptions> {
        let (assignments, _) = split_args(&args.args);

        let file = load_options(
            global_options_path().as_deref(),
            &project_options_path(&self.source_root),
        );

        let options = BuildOptions::from_assignments(
            file.assignments().into_iter().chain(assignments),
            &self.platform,
        )?;
        Ok(options)
    }

    pub fn builder(&self, args: &ConfigArgs) -> Result<ConfigurationBuilder> {
        let (_, targets) = split_args(&args.args);

        Ok(
            ConfigurationBuilder::new(self.options(args)?, self.platform.clone(), &self.cwd)
                .env(EnvVars::capture())
                .targets(targets)
                .source_root(&self.source_root),
        )
    }
}

/// Split command-line words into `KEY=VALUE` assignments and targets.
pub fn split_args(args: &[String]) -> (Vec<(String, String)>, Vec<String>) {
    let mut assignments = Vec::new();
    let mut targets = Vec::new();

    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => assignments.push((key.to_string(), value.to_string())),
            None => targets.push(arg.clone()),
        }
    }

    (assignments, targets)
}

/// Render a list of flags or paths on one line.
pub fn join<T: AsRef<std::ffi::OsStr>>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.as_ref().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
