//! Compiler and linker identities and their switch tables.
//!
//! Identities form a closed set. There is no generic fallback table, so a
//! compiler we do not know is a configuration error rather than a build
//! with silently wrong flags.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::ConfigError;

mod detect;
pub mod flags;

pub use detect::{detect_toolchain, ToolchainIdentity};
pub use flags::{c_flags, cxx_flags, link_flags, ComposedFlags};

/// Switches of interest for one compiler program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerOptions {
    pub warn_all: &'static str,
    pub warn_errors: &'static str,
    pub optimization: &'static str,
    pub debug: &'static [&'static str],
    /// Empty when the compiler enables exceptions by default
    pub exception_handling: &'static str,
    /// Empty when the compiler's default standard is used
    pub standard: &'static str,
}

/// Switches of interest for one linker program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkerOptions {
    pub debug: &'static str,
}

const GCC_OPTIONS: CompilerOptions = CompilerOptions {
    warn_all: "-Wall",
    warn_errors: "-Werror",
    optimization: "-O2",
    debug: &["-g"],
    exception_handling: "",
    standard: "",
};

const GXX_OPTIONS: CompilerOptions = CompilerOptions {
    standard: "-std=c++0x",
    ..GCC_OPTIONS
};

const CL_OPTIONS: CompilerOptions = CompilerOptions {
    warn_all: "/Wall",
    warn_errors: "/WX",
    optimization: "/Ox",
    debug: &["/Zi", "-D_DEBUG", "/MTd"],
    exception_handling: "/EHsc",
    standard: "",
};

const GNU_LINKER_OPTIONS: LinkerOptions = LinkerOptions { debug: "" };

const MSVC_LINKER_OPTIONS: LinkerOptions = LinkerOptions { debug: "/debug" };

/// Compiler program family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompilerIdentity {
    #[serde(rename = "gcc")]
    Gcc,
    #[serde(rename = "g++")]
    Gxx,
    #[serde(rename = "cl")]
    Cl,
}

impl CompilerIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerIdentity::Gcc => "gcc",
            CompilerIdentity::Gxx => "g++",
            CompilerIdentity::Cl => "cl",
        }
    }

    pub fn options(&self) -> &'static CompilerOptions {
        match self {
            CompilerIdentity::Gcc => &GCC_OPTIONS,
            CompilerIdentity::Gxx => &GXX_OPTIONS,
            CompilerIdentity::Cl => &CL_OPTIONS,
        }
    }

    /// Identify a compiler from a program name or path.
    ///
    /// `/usr/bin/gcc` and `cl.exe` are reduced to `gcc` and `cl`.
    pub fn from_program(program: &str) -> Result<Self, ConfigError> {
        program_stem(program)
            .parse()
            .map_err(|_: ConfigError| ConfigError::UnknownCompiler {
                name: program.to_string(),
            })
    }
}

impl FromStr for CompilerIdentity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gcc" => Ok(CompilerIdentity::Gcc),
            "g++" => Ok(CompilerIdentity::Gxx),
            "cl" => Ok(CompilerIdentity::Cl),
            _ => Err(ConfigError::UnknownCompiler {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CompilerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linker program family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LinkerIdentity {
    #[serde(rename = "gcc")]
    Gcc,
    #[serde(rename = "g++")]
    Gxx,
    #[serde(rename = "link")]
    Link,
}

impl LinkerIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkerIdentity::Gcc => "gcc",
            LinkerIdentity::Gxx => "g++",
            LinkerIdentity::Link => "link",
        }
    }

    pub fn options(&self) -> &'static LinkerOptions {
        match self {
            LinkerIdentity::Gcc | LinkerIdentity::Gxx => &GNU_LINKER_OPTIONS,
            LinkerIdentity::Link => &MSVC_LINKER_OPTIONS,
        }
    }

    /// Identify a linker from a program name or path.
    pub fn from_program(program: &str) -> Result<Self, ConfigError> {
        program_stem(program)
            .parse()
            .map_err(|_: ConfigError| ConfigError::UnknownLinker {
                name: program.to_string(),
            })
    }
}

impl FromStr for LinkerIdentity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gcc" => Ok(LinkerIdentity::Gcc),
            "g++" => Ok(LinkerIdentity::Gxx),
            "link" => Ok(LinkerIdentity::Link),
            _ => Err(ConfigError::UnknownLinker {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LinkerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip directories and a trailing `.exe` from a program name.
fn program_stem(program: &str) -> &str {
    let base = program.rsplit(['/', '\\']).next().unwrap_or(program);

    let split = base.len().saturating_sub(4);
    match base.get(split..) {
        Some(ext) if split > 0 && ext.eq_ignore_ascii_case(".exe") => &base[..split],
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_identities() {
        assert_eq!("gcc".parse::<CompilerIdentity>().unwrap(), CompilerIdentity::Gcc);
        assert_eq!("g++".parse::<CompilerIdentity>().unwrap(), CompilerIdentity::Gxx);
        assert_eq!("cl".parse::<CompilerIdentity>().unwrap(), CompilerIdentity::Cl);
        assert_eq!("link".parse::<LinkerIdentity>().unwrap(), LinkerIdentity::Link);
    }

    #[test]
    fn test_unknown_identities_are_errors() {
        assert!(matches!(
            "icc".parse::<CompilerIdentity>(),
            Err(ConfigError::UnknownCompiler { name }) if name == "icc"
        ));
        assert!(matches!(
            "cl".parse::<LinkerIdentity>(),
            Err(ConfigError::UnknownLinker { .. })
        ));
        assert!(matches!(
            CompilerIdentity::from_program("/opt/intel/bin/icc"),
            Err(ConfigError::UnknownCompiler { name }) if name == "/opt/intel/bin/icc"
        ));
    }

    #[test]
    fn test_from_program_strips_paths_and_exe() {
        assert_eq!(CompilerIdentity::from_program("/usr/bin/gcc").unwrap(), CompilerIdentity::Gcc);
        assert_eq!(CompilerIdentity::from_program("g++").unwrap(), CompilerIdentity::Gxx);
        let err = CompilerIdentity::from_program("C:\\VC\\bin\\CL.EXE").unwrap_err();
        assert_eq!(err.to_string(), "unknown compiler `C:\\VC\\bin\\CL.EXE`");

        let cl = CompilerIdentity::from_program("C:\\VC\\bin\\cl.exe").unwrap();
        assert_eq!(cl, CompilerIdentity::Cl);
        let link = LinkerIdentity::from_program("link.exe").unwrap();
        assert_eq!(link, LinkerIdentity::Link);
    }

    #[test]
    fn test_gxx_differs_from_gcc_only_in_standard() {
        let gcc = CompilerIdentity::Gcc.options();
        let gxx = CompilerIdentity::Gxx.options();
        assert_eq!(gxx.standard, "-std=c++0x");
        assert_eq!(CompilerOptions { standard: "", ..*gxx }, *gcc);
    }
}
