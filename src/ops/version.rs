//! Project version string.
//!
//! The version is `<base>.<revision>`, where the revision is the last
//! changed revision of the Subversion working copy. Versioning is best
//! effort: when `svn` is missing or says nothing useful, the revision is
//! `0` and configuration carries on.

use std::path::Path;

use crate::util::process::Toolbox;

/// Base version owned by the project.
pub const BASE_VERSION: &str = "2.1";

/// Revision used when no better one is known.
pub const PLACEHOLDER_REVISION: &str = "0";

const SVN: &str = "svn";

const REVISION_MARKER: &str = "Last Changed Rev: ";

/// Resolve `<base>.<revision>` for the working copy at `working_copy`.
pub fn resolve_version(base: &str, tools: &dyn Toolbox, working_copy: &Path) -> String {
    let svn = match tools.locate(SVN) {
        Ok(path) => path,
        Err(_) => {
            tracing::warn!("Failed to get subversion revision: {} not found", SVN);
            return format!("{}.{}", base, PLACEHOLDER_REVISION);
        }
    };

    let working_copy = working_copy.to_string_lossy();
    let revision = match tools.run(&svn, &["info", &working_copy]) {
        Ok(out) => parse_revision(&out.stdout).unwrap_or_else(|| {
            tracing::debug!("no `{}` in svn info output", REVISION_MARKER.trim_end());
            PLACEHOLDER_REVISION.to_string()
        }),
        Err(e) => {
            tracing::warn!("Failed to get subversion revision: {:#}", e);
            PLACEHOLDER_REVISION.to_string()
        }
    };

    format!("{}.{}", base, revision)
}

/// Extract the last changed revision from `svn info` output.
///
/// Returns the text between the marker and the next line break, or `None`
/// when the marker is missing or is not followed by a line break.
pub fn parse_revision(info: &str) -> Option<String> {
    let start = info.find(REVISION_MARKER)? + REVISION_MARKER.len();
    let rest = &info[start..];
    let end = rest.find('\n')?;

    Some(rest[..end].trim_end_matches('\r').to_string())
}
