//! Compile and link flag composition.
//!
//! Flags are appended in a fixed order: mode, exception handling (C++
//! only), warnings, warnings-as-errors, language standard. Some compilers
//! let a later switch override an earlier one, so the order is part of
//! the contract.
//!
//! Table entries that are empty for a compiler (e.g. the C++ exception
//! switch for g++, which has exceptions on by default) are still appended
//! in their slot and then dropped, so no list ever contains `""`.

use serde::Serialize;

use crate::core::options::{BuildMode, WarningPolicy};
use crate::errors::ConfigResult;

use super::{CompilerIdentity, LinkerIdentity};

/// Marker macro defined for debug builds of C sources.
pub const DEBUG_DEFINE: &str = "-DOCELOT_DEBUG";

/// Compile and link flags for both languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedFlags {
    pub c: Vec<String>,
    pub cxx: Vec<String>,
    pub link: Vec<String>,
}

impl ComposedFlags {
    pub fn compose(
        mode: BuildMode,
        warnings: WarningPolicy,
        cc: CompilerIdentity,
        cxx: CompilerIdentity,
        linker: LinkerIdentity,
    ) -> Self {
        ComposedFlags {
            c: c_flags(mode, warnings, cc),
            cxx: cxx_flags(mode, warnings, cxx),
            link: link_flags(mode, linker),
        }
    }

    /// Compose flags for compiler and linker program names.
    ///
    /// Fails without producing any list if a program is not a known
    /// identity.
    pub fn for_programs(
        mode: BuildMode,
        warnings: WarningPolicy,
        cc: &str,
        cxx: &str,
        linker: &str,
    ) -> ConfigResult<Self> {
        Ok(ComposedFlags::compose(
            mode,
            warnings,
            CompilerIdentity::from_program(cc)?,
            CompilerIdentity::from_program(cxx)?,
            LinkerIdentity::from_program(linker)?,
        ))
    }
}

/// Flags for compiling C sources.
pub fn c_flags(mode: BuildMode, warnings: WarningPolicy, cc: CompilerIdentity) -> Vec<String> {
    let opts = cc.options();
    let mut flags = Vec::new();

    match mode {
        BuildMode::Release => flags.push(opts.optimization),
        BuildMode::Debug => {
            flags.extend_from_slice(opts.debug);
            flags.push(DEBUG_DEFINE);
        }
    }

    push_warnings(&mut flags, warnings, opts.warn_all, opts.warn_errors);
    flags.push(opts.standard);

    finish(flags)
}

/// Flags for compiling C++ sources.
pub fn cxx_flags(mode: BuildMode, warnings: WarningPolicy, cxx: CompilerIdentity) -> Vec<String> {
    let opts = cxx.options();
    let mut flags = Vec::new();

    match mode {
        BuildMode::Release => flags.push(opts.optimization),
        BuildMode::Debug => flags.extend_from_slice(opts.debug),
    }

    flags.push(opts.exception_handling);
    push_warnings(&mut flags, warnings, opts.warn_all, opts.warn_errors);
    flags.push(opts.standard);

    finish(flags)
}

/// Flags for the link step.
pub fn link_flags(mode: BuildMode, linker: LinkerIdentity) -> Vec<String> {
    let mut flags = Vec::new();

    if mode == BuildMode::Debug {
        flags.push(linker.options().debug);
    }

    finish(flags)
}

fn push_warnings(
    flags: &mut Vec<&'static str>,
    warnings: WarningPolicy,
    warn_all: &'static str,
    warn_errors: &'static str,
) {
    if warnings.warn_all {
        flags.push(warn_all);
    }
    if warnings.warn_as_errors {
        flags.push(warn_errors);
    }
}

fn finish(flags: Vec<&'static str>) -> Vec<String> {
    flags
        .into_iter()
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}
