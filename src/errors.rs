//! Fatal configuration errors.
//!
//! Only conditions that abort resolution live here. Degraded outcomes
//! (an optional tool that is missing, a revision marker that never shows
//! up) are logged and encoded as data on the resolved configuration.

use std::fmt;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use thiserror::Error;

/// Result alias used by every resolver.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Width the terminal report is wrapped at.
const REPORT_WIDTH: usize = 120;

/// Error that stops configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown OS: cannot locate {what}")]
    UnsupportedOs { what: String },

    #[error("unknown compiler `{name}`")]
    UnknownCompiler { name: String },

    #[error("unknown linker `{name}`")]
    UnknownLinker { name: String },

    #[error("invalid value `{value}` for option `{option}`")]
    InvalidOption {
        option: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("unknown option `{option}`")]
    UnknownOption { option: String },

    #[error("{message}")]
    Packaging { message: String },

    #[error("failed to run `{tool}`: {message}")]
    ToolInvocation { tool: String, message: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn packaging(message: impl Into<String>) -> Self {
        ConfigError::Packaging {
            message: message.into(),
        }
    }

    pub(crate) fn tool(tool: impl Into<String>, err: anyhow::Error) -> Self {
        ConfigError::ToolInvocation {
            tool: tool.into(),
            message: format!("{:#}", err),
        }
    }

    /// Stable suffix of the diagnostic code, e.g. `invalid_option`.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::UnsupportedOs { .. } => "unsupported_os",
            ConfigError::UnknownCompiler { .. } => "unknown_compiler",
            ConfigError::UnknownLinker { .. } => "unknown_linker",
            ConfigError::InvalidOption { .. } => "invalid_option",
            ConfigError::UnknownOption { .. } => "unknown_option",
            ConfigError::Packaging { .. } => "packaging",
            ConfigError::ToolInvocation { .. } => "tool_invocation",
            ConfigError::Io { .. } => "io",
        }
    }

    fn help_text(&self) -> Option<String> {
        match self {
            ConfigError::UnsupportedOs { what } => Some(format!(
                "no default location for {} is known on this host; set the matching \
                 *_BIN_PATH, *_LIB_PATH and *_INC_PATH variables",
                what
            )),
            ConfigError::UnknownCompiler { .. } => {
                Some("set CC/CXX to one of: gcc, g++, cl".to_string())
            }
            ConfigError::UnknownLinker { .. } => {
                Some("set LINK to one of: gcc, g++, link".to_string())
            }
            ConfigError::InvalidOption { allowed, .. } if !allowed.is_empty() => {
                Some(format!("allowed values: {}", allowed.join(", ")))
            }
            ConfigError::UnknownOption { .. } => {
                Some("run `ocelot-config options` to list recognized options".to_string())
            }
            ConfigError::Packaging { .. } => Some(
                "Debian packages can only be built on Linux with dpkg-dev installed".to_string(),
            ),
            _ => None,
        }
    }

    /// Render the error as a terminal report: code, message, cause chain
    /// and help.
    pub fn render(&self, color: bool) -> String {
        let theme = if color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let handler = GraphicalReportHandler::new_themed(theme)
            .with_links(false)
            .with_width(REPORT_WIDTH);

        let mut out = String::new();
        if handler.render_report(&mut out, self).is_err() {
            out = format!("error: {}\n", self);
        }
        out
    }
}

impl Diagnostic for ConfigError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("ocelot::config::{}", self.kind())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_report_lists_allowed_values() {
        let err = ConfigError::InvalidOption {
            option: "mode".into(),
            value: "fast".into(),
            allowed: vec!["release".into(), "debug".into()],
        };

        let out = err.render(false);
        assert!(out.contains("ocelot::config::invalid_option"));
        assert!(out.contains("invalid value `fast` for option `mode`"));
        assert!(out.contains("allowed values: release, debug"));
    }

    #[test]
    fn test_code_and_help_come_from_variant() {
        let err = ConfigError::UnknownOption {
            option: "colour".into(),
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("ocelot::config::unknown_option"));
        assert!(err.help().is_some());

        let err = ConfigError::ToolInvocation {
            tool: "dpkg-architecture".into(),
            message: "permission denied".into(),
        };
        assert!(err.help().is_none());
        assert!(err.render(false).contains("failed to run `dpkg-architecture`"));
    }

    #[test]
    fn test_unsupported_os_message() {
        let err = ConfigError::UnsupportedOs {
            what: "boost".into(),
        };
        assert_eq!(err.to_string(), "unknown OS: cannot locate boost");
        assert_eq!(err.kind(), "unsupported_os");
    }
}
