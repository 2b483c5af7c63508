//! User-supplied build options.
//!
//! Options arrive as `KEY=VALUE` strings (from the command line or an
//! options file) and are validated against closed value sets before any
//! resolution happens. The same table drives the generated help text.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::core::platform::{OsFamily, Platform};
use crate::errors::{ConfigError, ConfigResult};

/// Release versus debug build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Release,
    Debug,
}

impl BuildMode {
    pub const ALLOWED: &'static [&'static str] = &["release", "debug"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Release => "release",
            BuildMode::Debug => "debug",
        }
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(BuildMode::Release),
            "debug" => Ok(BuildMode::Debug),
            _ => Err(invalid("mode", s, Self::ALLOWED)),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warning switches, independent of the build mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WarningPolicy {
    pub warn_all: bool,
    pub warn_as_errors: bool,
}

impl Default for WarningPolicy {
    fn default() -> Self {
        WarningPolicy {
            warn_all: true,
            warn_as_errors: true,
        }
    }
}

/// Which unit tests the build executor should build.
///
/// Carried through to the resolved configuration untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestLevel {
    #[default]
    None,
    Basic,
    Full,
}

impl TestLevel {
    pub const ALLOWED: &'static [&'static str] = &["none", "basic", "full"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestLevel::None => "none",
            TestLevel::Basic => "basic",
            TestLevel::Full => "full",
        }
    }
}

impl FromStr for TestLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(TestLevel::None),
            "basic" => Ok(TestLevel::Basic),
            "full" => Ok(TestLevel::Full),
            _ => Err(invalid("test_level", s, Self::ALLOWED)),
        }
    }
}

/// MS Visual C++ release selected on Windows hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MsvcVersion {
    #[serde(rename = "8.0")]
    V8,
    #[serde(rename = "9.0")]
    V9,
    #[serde(rename = "10.0")]
    V10,
}

impl MsvcVersion {
    pub const ALLOWED: &'static [&'static str] = &["8.0", "9.0", "10.0"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MsvcVersion::V8 => "8.0",
            MsvcVersion::V9 => "9.0",
            MsvcVersion::V10 => "10.0",
        }
    }
}

impl FromStr for MsvcVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8.0" => Ok(MsvcVersion::V8),
            "9.0" => Ok(MsvcVersion::V9),
            "10.0" => Ok(MsvcVersion::V10),
            _ => Err(invalid("MSVC_VERSION", s, Self::ALLOWED)),
        }
    }
}

/// Value shape of a recognized option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Enum(&'static [&'static str]),
    Bool,
    Path,
    /// A compiler or linker program name
    Program,
}

/// One recognized option.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub key: &'static str,
    pub help: &'static str,
    pub kind: OptionKind,
    /// Rendered default, `None` when the option has no default
    pub default: Option<&'static str>,
    /// Only offered on Windows hosts
    pub windows_only: bool,
}

const OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        key: "MSVC_VERSION",
        help: "MS Visual C++ version",
        kind: OptionKind::Enum(MsvcVersion::ALLOWED),
        default: None,
        windows_only: true,
    },
    OptionSpec {
        key: "mode",
        help: "Release versus debug mode",
        kind: OptionKind::Enum(BuildMode::ALLOWED),
        default: Some("release"),
        windows_only: false,
    },
    OptionSpec {
        key: "Wall",
        help: "Enable all compilation warnings",
        kind: OptionKind::Bool,
        default: Some("yes"),
        windows_only: false,
    },
    OptionSpec {
        key: "Werror",
        help: "Treat warnings as errors",
        kind: OptionKind::Bool,
        default: Some("yes"),
        windows_only: false,
    },
    OptionSpec {
        key: "enable_llvm",
        help: "Compile in support for LLVM if available",
        kind: OptionKind::Bool,
        default: Some("yes"),
        windows_only: false,
    },
    OptionSpec {
        key: "test_level",
        help: "Build the ocelot unit tests at the given test level",
        kind: OptionKind::Enum(TestLevel::ALLOWED),
        default: Some("none"),
        windows_only: false,
    },
    OptionSpec {
        key: "install_path",
        help: "The ocelot install path",
        kind: OptionKind::Path,
        default: Some("/usr/local"),
        windows_only: false,
    },
    OptionSpec {
        key: "CC",
        help: "C compiler program",
        kind: OptionKind::Program,
        default: None,
        windows_only: false,
    },
    OptionSpec {
        key: "CXX",
        help: "C++ compiler program",
        kind: OptionKind::Program,
        default: None,
        windows_only: false,
    },
    OptionSpec {
        key: "LINK",
        help: "Linker program",
        kind: OptionKind::Program,
        default: None,
        windows_only: false,
    },
];

/// Options recognized on `platform`, in help-text order.
pub fn recognized_options(platform: &Platform) -> impl Iterator<Item = &'static OptionSpec> + '_ {
    OPTIONS
        .iter()
        .filter(move |spec| !spec.windows_only || platform.os_family() == OsFamily::Windows)
}

/// Parse a boolean option value.
///
/// Accepts the usual spellings: `y yes t true 1 on all` and
/// `n no f false 0 off none`, case-insensitively.
pub fn parse_bool(option: &str, value: &str) -> ConfigResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "1" | "on" | "all" => Ok(true),
        "n" | "no" | "f" | "false" | "0" | "off" | "none" => Ok(false),
        _ => Err(ConfigError::InvalidOption {
            option: option.to_string(),
            value: value.to_string(),
            allowed: vec!["yes".into(), "no".into()],
        }),
    }
}

fn invalid(option: &str, value: &str, allowed: &[&str]) -> ConfigError {
    ConfigError::InvalidOption {
        option: option.to_string(),
        value: value.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

/// The validated set of user options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOptions {
    pub mode: BuildMode,
    pub warnings: WarningPolicy,
    pub enable_llvm: bool,
    pub test_level: TestLevel,
    pub install_path: PathBuf,
    pub msvc_version: Option<MsvcVersion>,
    pub cc: Option<String>,
    pub cxx: Option<String>,
    pub link: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            mode: BuildMode::default(),
            warnings: WarningPolicy::default(),
            enable_llvm: true,
            test_level: TestLevel::default(),
            install_path: PathBuf::from("/usr/local"),
            msvc_version: None,
            cc: None,
            cxx: None,
            link: None,
        }
    }
}

impl BuildOptions {
    /// Apply `assignments` on top of the defaults, later ones winning.
    pub fn from_assignments<I, K, V>(assignments: I, platform: &Platform) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = BuildOptions::default();
        for (key, value) in assignments {
            options.set(key.as_ref(), value.as_ref(), platform)?;
        }
        Ok(options)
    }

    /// Validate and apply a single `key=value` assignment.
    pub fn set(&mut self, key: &str, value: &str, platform: &Platform) -> ConfigResult<()> {
        match key {
            "MSVC_VERSION" if platform.os_family() == OsFamily::Windows => {
                self.msvc_version = Some(value.parse()?)
            }
            "mode" => self.mode = value.parse()?,
            "Wall" => self.warnings.warn_all = parse_bool(key, value)?,
            "Werror" => self.warnings.warn_as_errors = parse_bool(key, value)?,
            "enable_llvm" => self.enable_llvm = parse_bool(key, value)?,
            "test_level" => self.test_level = value.parse()?,
            "install_path" => self.install_path = PathBuf::from(value),
            "CC" => self.cc = non_empty(value),
            "CXX" => self.cxx = non_empty(value),
            "LINK" => self.link = non_empty(value),
            _ => {
                return Err(ConfigError::UnknownOption {
                    option: key.to_string(),
                })
            }
        }

        Ok(())
    }

    /// Current value of an option, rendered the way help text shows it.
    pub fn actual(&self, key: &str) -> Option<String> {
        let yes_no = |b: bool| if b { "yes" } else { "no" }.to_string();

        match key {
            "MSVC_VERSION" => self.msvc_version.map(|v| v.as_str().to_string()),
            "mode" => Some(self.mode.to_string()),
            "Wall" => Some(yes_no(self.warnings.warn_all)),
            "Werror" => Some(yes_no(self.warnings.warn_as_errors)),
            "enable_llvm" => Some(yes_no(self.enable_llvm)),
            "test_level" => Some(self.test_level.as_str().to_string()),
            "install_path" => Some(self.install_path.display().to_string()),
            "CC" => self.cc.clone(),
            "CXX" => self.cxx.clone(),
            "LINK" => self.link.clone(),
            _ => None,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Render help text for every option recognized on `platform`.
pub fn help_text(options: &BuildOptions, platform: &Platform) -> String {
    let mut out = String::new();

    for spec in recognized_options(platform) {
        let shape = match spec.kind {
            OptionKind::Enum(values) => format!("({})", values.join("|")),
            OptionKind::Bool => "(yes|no)".to_string(),
            OptionKind::Path => format!("( /path/to/{} )", spec.key),
            OptionKind::Program => "( program name or path )".to_string(),
        };

        out.push_str(&format!("{}: {} {}\n", spec.key, spec.help, shape));
        out.push_str(&format!("    default: {}\n", spec.default.unwrap_or("None")));
        out.push_str(&format!(
            "    actual: {}\n\n",
            options.actual(spec.key).as_deref().unwrap_or("None")
        ));
    }

    out
}
