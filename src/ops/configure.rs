//! Build configuration resolution.
//!
//! [`ConfigurationBuilder`] runs every resolver once, in a fixed order, and
//! freezes the result into a [`ResolvedConfiguration`]:
//!
//! 1. validated options (already parsed into [`BuildOptions`])
//! 2. compiler and linker identities
//! 3. version string
//! 4. install path
//! 5. Debian architecture, when a `debian` target was requested
//! 6. dependency locations
//! 7. compile and link flags
//! 8. linker argument string
//!
//! A fatal error at any step aborts the whole resolution; nothing partial
//! is returned.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::options::{
    help_text, BuildMode, BuildOptions, MsvcVersion, TestLevel, WarningPolicy,
};
use crate::core::paths::{PathSlot, PathTriple};
use crate::core::platform::Platform;
use crate::deps::{resolve_dependencies, DependencyPaths, LlvmAvailability};
use crate::errors::ConfigResult;
use crate::ops::packaging::debian_architecture;
use crate::ops::version::{resolve_version, BASE_VERSION};
use crate::toolchain::{detect_toolchain, ComposedFlags, ToolchainIdentity};
use crate::util::env::EnvVars;
use crate::util::fs::{absolutize, parent_or_self};
use crate::util::process::Toolbox;

/// Library produced by the project itself, first on every link line.
pub const PROJECT_LIB: &str = "-locelot";

/// Libraries every consumer of the project library links against.
pub const EXTRA_LIBS: &[&str] = &[
    "-lboost_system-mt",
    "-lboost_filesystem-mt",
    "-lboost_thread-mt",
    "-lGLEW",
];

/// Flags for the parser generator.
pub const YACC_FLAGS: &[&str] = &["-d"];

/// Command-line target that selects the user's install path.
pub const INSTALL_TARGET: &str = "install";

/// Command-line target that requires a Debian architecture.
pub const DEBIAN_TARGET: &str = "debian";

/// Inputs for one configuration run.
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    options: BuildOptions,
    targets: Vec<String>,
    platform: Platform,
    env: EnvVars,
    cwd: PathBuf,
    source_root: Option<PathBuf>,
}

impl ConfigurationBuilder {
    /// Create a builder for `options` on `platform`, run from `cwd`.
    ///
    /// `cwd` is the build directory; relative paths are resolved against it.
    pub fn new(options: BuildOptions, platform: Platform, cwd: impl Into<PathBuf>) -> Self {
        ConfigurationBuilder {
            options,
            targets: Vec::new(),
            platform,
            env: EnvVars::empty(),
            cwd: cwd.into(),
            source_root: None,
        }
    }

    /// Environment to read dependency overrides from.
    pub fn env(mut self, env: EnvVars) -> Self {
        self.env = env;
        self
    }

    /// Targets requested on the command line.
    pub fn targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Project source tree. Defaults to the parent of the build directory.
    pub fn source_root(mut self, root: impl AsRef<Path>) -> Self {
        self.source_root = Some(absolutize(root, &self.cwd));
        self
    }

    fn has_target(&self, name: &str) -> bool {
        self.targets.iter().any(|t| t == name)
    }

    /// Help text for every recognized option, with current values.
    pub fn help_text(&self) -> String {
        help_text(&self.options, &self.platform)
    }

    /// Run every resolver and freeze the result.
    pub fn resolve(&self, tools: &dyn Toolbox) -> ConfigResult<ResolvedConfiguration> {
        let build_dir = absolutize(".", &self.cwd);
        let source_root = self
            .source_root
            .clone()
            .unwrap_or_else(|| parent_or_self(&build_dir));

        let toolchain = detect_toolchain(&self.options, &self.platform)?;

        let version = resolve_version(BASE_VERSION, tools, &source_root);

        let install_path = if self.has_target(INSTALL_TARGET) {
            absolutize(&self.options.install_path, &self.cwd)
        } else {
            build_dir.clone()
        };

        let debian_arch = if self.has_target(DEBIAN_TARGET) {
            Some(debian_architecture(&self.platform, tools)?)
        } else {
            None
        };

        let deps = resolve_dependencies(
            &self.platform,
            &self.env,
            &self.cwd,
            self.options.enable_llvm,
            tools,
        )?;

        let composed = ComposedFlags::compose(
            self.options.mode,
            self.options.warnings,
            toolchain.cc,
            toolchain.cxx,
            toolchain.link,
        );

        let mut cxx_flags = composed.cxx;
        append_unique(&mut cxx_flags, deps.llvm.cpp_flags().iter().cloned());

        let mut link_flags = composed.link;
        append_unique(&mut link_flags, deps.llvm.ld_flags().iter().cloned());

        let mut include_paths = Vec::new();
        append_unique(&mut include_paths, [build_dir, source_root]);
        append_unique(&mut include_paths, slot(&deps.boost.include_dir));
        append_unique(&mut include_paths, slot(&deps.glew.include_dir));
        append_unique(&mut include_paths, deps.llvm.include_dirs().iter().cloned());

        let mut library_paths = Vec::new();
        append_unique(&mut library_paths, slot(&deps.boost.library_dir));
        append_unique(&mut library_paths, slot(&deps.glew.library_dir));
        append_unique(&mut library_paths, deps.llvm.lib_dirs().iter().cloned());

        let extra_libs: Vec<String> = EXTRA_LIBS.iter().map(|s| s.to_string()).collect();
        let linker_args = linker_args(&extra_libs, &deps.llvm);

        tracing::info!(
            "Configured ocelot {} ({} mode, LLVM {})",
            version,
            self.options.mode,
            deps.llvm.describe()
        );

        Ok(ResolvedConfiguration {
            mode: self.options.mode,
            warnings: self.options.warnings,
            test_level: self.options.test_level,
            msvc_version: self.options.msvc_version,
            toolchain,
            c_flags: composed.c,
            cxx_flags,
            link_flags,
            yacc_flags: YACC_FLAGS.iter().map(|s| s.to_string()).collect(),
            version,
            install_path,
            debian_arch,
            dependencies: deps,
            include_paths,
            library_paths,
            extra_libs,
            linker_args,
            targets: self.targets.clone(),
        })
    }
}

/// Project library, then the extra libraries in declared order, then the
/// LLVM libraries in the order `llvm-config` printed them.
pub fn linker_args(extra_libs: &[String], llvm: &LlvmAvailability) -> String {
    std::iter::once(PROJECT_LIB)
        .chain(extra_libs.iter().map(String::as_str))
        .chain(llvm.libs().iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn slot(slot: &PathSlot) -> Option<PathBuf> {
    slot.as_path().map(Path::to_path_buf)
}

/// Append items not already present, keeping first-seen order.
fn append_unique<T: PartialEq>(list: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    for item in items {
        if !list.contains(&item) {
            list.push(item);
        }
    }
}

/// The resolved build configuration handed to the build executor.
///
/// Immutable once built; every field is read through an accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    mode: BuildMode,
    warnings: WarningPolicy,
    test_level: TestLevel,
    msvc_version: Option<MsvcVersion>,
    toolchain: ToolchainIdentity,
    c_flags: Vec<String>,
    cxx_flags: Vec<String>,
    link_flags: Vec<String>,
    yacc_flags: Vec<String>,
    version: String,
    install_path: PathBuf,
    debian_arch: Option<String>,
    dependencies: DependencyPaths,
    include_paths: Vec<PathBuf>,
    library_paths: Vec<PathBuf>,
    extra_libs: Vec<String>,
    linker_args: String,
    targets: Vec<String>,
}

impl ResolvedConfiguration {
    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn warnings(&self) -> WarningPolicy {
        self.warnings
    }

    /// Unit-test level, for the build executor to interpret.
    pub fn test_level(&self) -> TestLevel {
        self.test_level
    }

    pub fn msvc_version(&self) -> Option<MsvcVersion> {
        self.msvc_version
    }

    pub fn toolchain(&self) -> ToolchainIdentity {
        self.toolchain
    }

    pub fn c_flags(&self) -> &[String] {
        &self.c_flags
    }

    pub fn cxx_flags(&self) -> &[String] {
        &self.cxx_flags
    }

    pub fn link_flags(&self) -> &[String] {
        &self.link_flags
    }

    pub fn yacc_flags(&self) -> &[String] {
        &self.yacc_flags
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    pub fn debian_arch(&self) -> Option<&str> {
        self.debian_arch.as_deref()
    }

    pub fn dependencies(&self) -> &DependencyPaths {
        &self.dependencies
    }

    pub fn cuda(&self) -> &PathTriple {
        &self.dependencies.cuda
    }

    pub fn boost(&self) -> &PathTriple {
        &self.dependencies.boost
    }

    pub fn glew(&self) -> &PathTriple {
        &self.dependencies.glew
    }

    pub fn llvm(&self) -> &LlvmAvailability {
        &self.dependencies.llvm
    }

    pub fn have_llvm(&self) -> bool {
        self.dependencies.llvm.is_available()
    }

    pub fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }

    pub fn library_paths(&self) -> &[PathBuf] {
        &self.library_paths
    }

    pub fn extra_libs(&self) -> &[String] {
        &self.extra_libs
    }

    /// Libraries to link a program against the project library.
    pub fn linker_args(&self) -> &str {
        &self.linker_args
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }
}
