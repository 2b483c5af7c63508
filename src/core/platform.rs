//! Host platform detection.

use std::fmt;

use serde::Serialize;

/// Operating-system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Posix,
    Windows,
    /// Anything else. Callers that need an OS-keyed default fail on this.
    Unknown,
}

impl OsFamily {
    /// Map a Rust `target_family` value to an OS family.
    pub fn from_target_family(family: &str) -> Self {
        match family {
            "unix" => OsFamily::Posix,
            "windows" => OsFamily::Windows,
            _ => OsFamily::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Posix => "posix",
            OsFamily::Windows => "windows",
            OsFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the resolvers need to know about the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    family: OsFamily,
    machine: String,
}

impl Platform {
    pub fn new(family: OsFamily, machine: impl Into<String>) -> Self {
        Platform {
            family,
            machine: machine.into(),
        }
    }

    /// Detect the running host.
    pub fn host() -> Self {
        Platform::new(
            OsFamily::from_target_family(std::env::consts::FAMILY),
            std::env::consts::ARCH,
        )
    }

    pub fn os_family(&self) -> OsFamily {
        self.family
    }

    /// 64-bit word width, judged by the machine name ending in `64`.
    pub fn is_sixty_four_bit(&self) -> bool {
        self.machine.ends_with("64")
    }
}
