//! Typed `git` queries and the commit step.

use std::path::PathBuf;

use crate::context::CallContext;
use crate::error::ToolError;

use super::options::{GitOption, compose};
use super::tool::{ExternalTool, RunMode};

/// Format used for `git log`: short hash, subject, then the body.
pub const LOG_FORMAT: &str = "--pretty=format:%h %s%n%b%n";

/// Trailing flags for `git commit -em <message>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitFlag {
    Amend,
    All,
}

impl CommitFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitFlag::Amend => "--amend",
            CommitFlag::All => "--all",
        }
    }
}

/// Build the argument list for `git commit`.
pub fn commit_args(message: &str, flags: &[CommitFlag]) -> Vec<String> {
    let mut args = vec!["-em".to_string(), message.to_string()];
    args.extend(flags.iter().map(|f| f.as_str().to_string()));
    args
}

/// The `git` binary, optionally bound to a repository directory.
#[derive(Debug, Clone)]
pub struct Git {
    tool: ExternalTool,
}

impl Default for Git {
    fn default() -> Self {
        Self::new()
    }
}

impl Git {
    pub fn new() -> Self {
        Self {
            tool: ExternalTool::git(),
        }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            tool: ExternalTool::git().in_dir(dir),
        }
    }

    pub fn tool(&self) -> &ExternalTool {
        &self.tool
    }

    /// `git diff [options...]`
    pub async fn diff(&self, ctx: &CallContext, options: &[GitOption]) -> Result<String, ToolError> {
        self.tool
            .run(ctx, "diff", &compose(options), RunMode::Capture)
            .await
    }

    /// `git log --pretty=format:"%h %s%n%b%n" [options...]`
    pub async fn log(&self, ctx: &CallContext, options: &[GitOption]) -> Result<String, ToolError> {
        let mut tokens = vec![LOG_FORMAT.to_string()];
        tokens.extend(compose(options));
        self.tool.run(ctx, "log", &tokens, RunMode::Capture).await
    }

    /// `git branch --show-current`. Empty on a detached HEAD.
    pub async fn current_branch(&self, ctx: &CallContext) -> Result<String, ToolError> {
        self.tool
            .run(ctx, "branch", &["--show-current".to_string()], RunMode::Capture)
            .await
    }

    /// `git rev-parse --show-toplevel`
    pub async fn root(&self, ctx: &CallContext) -> Result<PathBuf, ToolError> {
        let root = self
            .tool
            .run(ctx, "rev-parse", &["--show-toplevel".to_string()], RunMode::Capture)
            .await?;
        Ok(PathBuf::from(root))
    }

    /// `git commit -em <message> [--amend] [--all]`, opening the user's editor.
    pub async fn commit_with_message(
        &self,
        ctx: &CallContext,
        message: &str,
        flags: &[CommitFlag],
    ) -> Result<(), ToolError> {
        self.tool
            .run(ctx, "commit", &commit_args(message, flags), RunMode::Interactive)
            .await
            .map(|_| ())
    }
}
