//! Subprocess execution and tool lookup.
//!
//! Resolvers never spawn processes directly. They receive a [`Toolbox`],
//! which the CLI backs with [`SystemTools`] and tests back with a scripted
//! mock.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command and wait for completion.
    pub fn exec(&self) -> Result<Output> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))?;

        Ok(output)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// An executable was not found on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolNotFound {
    pub name: String,
}

impl fmt::Display for ToolNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` not found in PATH", self.name)
    }
}

impl std::error::Error for ToolNotFound {}

/// Captured output of a tool query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Standard output, lossily decoded
    pub stdout: String,
}

impl ToolOutput {
    /// Whitespace-separated tokens of stdout.
    pub fn tokens(&self) -> Vec<String> {
        self.stdout.split_whitespace().map(str::to_string).collect()
    }
}

/// Finds executables on the tool search path.
///
/// A miss is a recoverable signal; callers decide whether the tool is
/// mandatory.
pub trait ToolLocator {
    fn locate(&self, name: &str) -> std::result::Result<PathBuf, ToolNotFound>;
}

/// Runs a located tool and captures its stdout.
pub trait ToolRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<ToolOutput>;
}

/// Everything a resolver needs from the outside world's executables.
pub trait Toolbox: ToolLocator + ToolRunner {}

impl<T: ToolLocator + ToolRunner> Toolbox for T {}

/// [`Toolbox`] backed by the real `PATH` and real subprocesses.
#[derive(Debug, Clone, Default)]
pub struct SystemTools {
    cwd: Option<PathBuf>,
}

impl SystemTools {
    pub fn new() -> Self {
        SystemTools::default()
    }

    /// Run every tool from `cwd` instead of the process working directory.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        SystemTools {
            cwd: Some(cwd.into()),
        }
    }
}

impl ToolLocator for SystemTools {
    fn locate(&self, name: &str) -> std::result::Result<PathBuf, ToolNotFound> {
        find_executable(name).ok_or_else(|| ToolNotFound {
            name: name.to_string(),
        })
    }
}

impl ToolRunner for SystemTools {
    fn run(&self, program: &Path, args: &[&str]) -> Result<ToolOutput> {
        let mut pb = ProcessBuilder::new(program).args(args);
        if let Some(ref cwd) = self.cwd {
            pb = pb.cwd(cwd);
        }

        tracing::debug!("running `{}`", pb.display_command());
        let output = pb.exec()?;

        if !output.status.success() {
            tracing::debug!(
                "`{}` exited with {:?}: {}",
                pb.display_command(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("llvm-config").args(["--libs", "core", "jit"]);

        assert_eq!(pb.display_command(), "llvm-config --libs core jit");
    }

    #[test]
    fn test_tool_output_tokens() {
        let out = ToolOutput {
            stdout: "-I/usr/include  -D_GNU_SOURCE\n-DNDEBUG\n".into(),
        };
        assert_eq!(out.tokens(), ["-I/usr/include", "-D_GNU_SOURCE", "-DNDEBUG"]);
    }

    #[test]
    fn test_missing_tool_is_not_found() {
        let tools = SystemTools::new();
        let err = tools
            .locate("ocelot-definitely-not-a-real-tool")
            .unwrap_err();
        assert_eq!(err.name, "ocelot-definitely-not-a-real-tool");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_stdout() {
        let tools = SystemTools::new();
        let echo = tools.locate("echo").unwrap();
        let out = tools.run(&echo, &["hello"]).unwrap();

        assert_eq!(out.stdout.trim(), "hello");
    }
}
