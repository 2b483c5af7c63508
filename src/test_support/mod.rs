//! Test utilities and mocks for unit tests.
//!
//! [`MockTools`] stands in for the tool search path and for subprocesses,
//! so resolvers can be exercised without `llvm-config`, `svn` or
//! `dpkg-architecture` installed.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut tools = MockTools::new();
//! tools
//!     .install("svn", "/usr/bin/svn")
//!     .respond("svn info /src/ocelot", "Last Changed Rev: 42\n");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::platform::{OsFamily, Platform};
use crate::util::process::{ToolLocator, ToolNotFound, ToolOutput, ToolRunner};

/// Mock tool search path and executor.
///
/// Commands are matched on the program's file name followed by the
/// arguments, space separated (e.g. `llvm-config --libdir`). A command
/// with no scripted response fails, like a tool that could not be
/// spawned.
#[derive(Debug, Default)]
pub struct MockTools {
    installed: HashMap<String, PathBuf>,
    responses: HashMap<String, ToolOutput>,
    calls: RefCell<Vec<String>>,
}

impl MockTools {
    pub fn new() -> Self {
        MockTools::default()
    }

    /// Put `name` on the mock search path at `path`.
    pub fn install(&mut self, name: &str, path: impl Into<PathBuf>) -> &mut Self {
        self.installed.insert(name.to_string(), path.into());
        self
    }

    /// Script a successful run of `cmd` printing `stdout`.
    pub fn respond(&mut self, cmd: &str, stdout: impl Into<String>) -> &mut Self {
        let output = ToolOutput {
            stdout: stdout.into(),
        };
        self.responses.insert(cmd.to_string(), output);
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ToolLocator for MockTools {
    fn locate(&self, name: &str) -> std::result::Result<PathBuf, ToolNotFound> {
        self.installed.get(name).cloned().ok_or_else(|| ToolNotFound {
            name: name.to_string(),
        })
    }
}

impl ToolRunner for MockTools {
    fn run(&self, program: &Path, args: &[&str]) -> Result<ToolOutput> {
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let full_cmd = if args.is_empty() {
            name
        } else {
            format!("{} {}", name, args.join(" "))
        };

        self.calls.borrow_mut().push(full_cmd.clone());

        match self.responses.get(&full_cmd) {
            Some(output) => Ok(output.clone()),
            None => bail!("unexpected command: {}", full_cmd),
        }
    }
}

/// A 64-bit POSIX host.
pub fn posix_x86_64() -> Platform {
    Platform::new(OsFamily::Posix, "x86_64")
}

/// Tools with a scripted `llvm-config` installing LLVM under `/usr/lib/llvm`.
pub fn llvm_tools() -> MockTools {
    let mut tools = MockTools::new();
    tools
        .install("llvm-config", "/usr/bin/llvm-config")
        .respond("llvm-config --bindir", "/usr/lib/llvm/bin\n")
        .respond("llvm-config --libdir", "/usr/lib/llvm/lib\n")
        .respond("llvm-config --includedir", "/usr/lib/llvm/include\n")
        .respond(
            "llvm-config --cppflags",
            "-I/usr/lib/llvm/include  -D_GNU_SOURCE\n",
        )
        .respond("llvm-config --ldflags", "-L/usr/lib/llvm/lib\n")
        .respond(
            "llvm-config --libs core jit native asmparser instcombine",
            "-lLLVMCore -lLLVMJIT\n-lLLVMSupport\n",
        );
    tools
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_tools_basic() {
        let mut tools = MockTools::new();
        tools
            .install("svn", "/usr/bin/svn")
            .respond("svn info .", "Revision: 1\n");

        let svn = tools.locate("svn").unwrap();
        assert_eq!(svn, PathBuf::from("/usr/bin/svn"));

        let out = tools.run(&svn, &["info", "."]).unwrap();
        assert_eq!(out.stdout, "Revision: 1\n");
        assert_eq!(tools.calls(), ["svn info ."]);
    }

    #[test]
    fn test_mock_tools_unexpected() {
        let tools = MockTools::new();
        assert!(tools.locate("svn").is_err());

        let result = tools.run(Path::new("/usr/bin/svn"), &["info"]);
        assert!(result.is_err());
        assert_eq!(tools.calls(), ["svn info"]);
    }
}
