//! Composable options for `git diff` and `git log` invocations.

use std::fmt;

/// One named unit of a diff/log query.
///
/// Options render independently and are concatenated in the order given.
/// Nothing here checks whether a combination makes sense to git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitOption {
    /// `--staged`
    Staged,
    /// `--stat`
    Stats,
    /// A revision passed through verbatim, e.g. `HEAD^`.
    Target(String),
    /// `--cached <ref>`
    Cached(String),
    /// `<base>..<head>`
    BranchRange { base: String, head: String },
}

impl GitOption {
    pub fn target(reference: impl Into<String>) -> Self {
        GitOption::Target(reference.into())
    }

    pub fn cached(reference: impl Into<String>) -> Self {
        GitOption::Cached(reference.into())
    }

    pub fn branches(base: impl Into<String>, head: impl Into<String>) -> Self {
        GitOption::BranchRange {
            base: base.into(),
            head: head.into(),
        }
    }

    /// Render this option as command-line tokens.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            GitOption::Staged => vec!["--staged".to_string()],
            GitOption::Stats => vec!["--stat".to_string()],
            GitOption::Target(reference) => vec![reference.clone()],
            GitOption::Cached(reference) => vec!["--cached".to_string(), reference.clone()],
            GitOption::BranchRange { base, head } => vec![format!("{base}..{head}")],
        }
    }
}

impl fmt::Display for GitOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

/// Concatenate the tokens of each option, preserving order.
pub fn compose(options: &[GitOption]) -> Vec<String> {
    options.iter().flat_map(GitOption::tokens).collect()
}
