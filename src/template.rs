//! Pull request template discovery.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::WorkflowError;

/// Paths probed under the repository root, in order. First hit wins.
pub const PR_TEMPLATE_PATHS: [&str; 3] = [
    ".github/pull_request_template.md",
    "docs/pull_request_template.md",
    "PULL_REQUEST_TEMPLATE.md",
];

/// Read the first PR template found under `root`.
///
/// A missing file moves on to the next candidate; any other read failure is
/// an error rather than a silent skip.
pub fn find_pr_template(root: &Path) -> Result<Option<String>, WorkflowError> {
    for relative in PR_TEMPLATE_PATHS {
        let path = root.join(relative);
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), "using PR template");
                return Ok(Some(content));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => return Err(WorkflowError::TemplateRead { path, source }),
        }
    }

    Ok(None)
}
