//! Third-party dependency discovery.
//!
//! Each mandatory dependency starts from a fixed per-OS default triple.
//! Every component can then be overridden on its own through an
//! environment variable, e.g. `BOOST_INC_PATH` replaces only the Boost
//! include directory. LLVM is optional and probed through `llvm-config`
//! (see [`llvm`]).

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::core::paths::{PathComponent, PathSlot, PathTriple};
use crate::core::platform::{OsFamily, Platform};
use crate::errors::{ConfigError, ConfigResult};
use crate::util::env::EnvVars;
use crate::util::fs::absolutize;
use crate::util::process::Toolbox;

pub mod llvm;

pub use llvm::{probe_llvm, LlvmAvailability, LlvmConfig};

/// A dependency located through default directories and env overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// CUDA toolkit
    Cuda,
    /// Boost system/filesystem/thread
    Boost,
    /// OpenGL extension wrangler
    Glew,
}

impl Dependency {
    pub const ALL: [Dependency; 3] = [Dependency::Cuda, Dependency::Boost, Dependency::Glew];

    pub fn name(&self) -> &'static str {
        match self {
            Dependency::Cuda => "CUDA",
            Dependency::Boost => "boost",
            Dependency::Glew => "GLEW",
        }
    }

    /// Prefix of the override variables (`CUDA` for `CUDA_BIN_PATH`).
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Dependency::Cuda => "CUDA",
            Dependency::Boost => "BOOST",
            Dependency::Glew => "GLEW",
        }
    }

    /// Environment variable overriding `component`.
    pub fn env_var(&self, component: PathComponent) -> String {
        format!("{}_{}", self.env_prefix(), component.env_suffix())
    }

    /// Default directories on `platform`, before any override.
    pub fn default_paths(&self, platform: &Platform) -> ConfigResult<PathTriple> {
        let unsupported = || ConfigError::UnsupportedOs {
            what: self.name().to_string(),
        };

        let (bin, lib, inc) = match (self, platform.os_family()) {
            (Dependency::Cuda, OsFamily::Windows) => {
                ("C:/CUDA/bin", "C:/CUDA/lib", "C:/CUDA/include")
            }
            (Dependency::Cuda, OsFamily::Posix) => (
                "/usr/local/cuda/bin",
                "/usr/local/cuda/lib",
                "/usr/local/cuda/include",
            ),
            (Dependency::Boost | Dependency::Glew, OsFamily::Posix) => {
                ("/usr/bin", "/usr/lib", "/usr/include")
            }
            _ => return Err(unsupported()),
        };

        let lib = if *self == Dependency::Cuda && platform.is_sixty_four_bit() {
            format!("{}64", lib)
        } else {
            lib.to_string()
        };

        Ok(PathTriple::new(bin, lib.as_str(), inc))
    }

    /// Default directories with environment overrides applied.
    ///
    /// Override values are made absolute against `cwd`.
    pub fn resolve(
        &self,
        platform: &Platform,
        env: &EnvVars,
        cwd: &Path,
    ) -> ConfigResult<PathTriple> {
        let mut triple = self.default_paths(platform)?;

        for component in PathComponent::ALL {
            let var = self.env_var(component);
            if let Some(value) = env.get(&var) {
                let path = absolutize(value, cwd);
                tracing::debug!(
                    "{} overrides {} default with {}",
                    var,
                    self.name(),
                    path.display()
                );
                triple.set(component, PathSlot::Set(path));
            }
        }

        Ok(triple)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved locations of every dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyPaths {
    pub cuda: PathTriple,
    pub boost: PathTriple,
    pub glew: PathTriple,
    pub llvm: LlvmAvailability,
}

impl DependencyPaths {
    pub fn get(&self, dep: Dependency) -> &PathTriple {
        match dep {
            Dependency::Cuda => &self.cuda,
            Dependency::Boost => &self.boost,
            Dependency::Glew => &self.glew,
        }
    }
}

/// Resolve every dependency.
///
/// Fails on the first mandatory dependency with no default for the host.
pub fn resolve_dependencies(
    platform: &Platform,
    env: &EnvVars,
    cwd: &Path,
    enable_llvm: bool,
    tools: &dyn Toolbox,
) -> ConfigResult<DependencyPaths> {
    Ok(DependencyPaths {
        cuda: Dependency::Cuda.resolve(platform, env, cwd)?,
        boost: Dependency::Boost.resolve(platform, env, cwd)?,
        glew: Dependency::Glew.resolve(platform, env, cwd)?,
        llvm: probe_llvm(enable_llvm, platform, tools)?,
    })
}
