//! Opening pull requests through the `gh` CLI.

use std::path::PathBuf;

use crate::context::CallContext;
use crate::error::ToolError;

use super::tool::{ExternalTool, RunMode};

/// Everything `gh pr create` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPrParams {
    pub title: String,
    pub body: String,
    pub base: String,
    pub head: String,
    /// Pass `--editor` so the user can review title and body before submitting.
    pub use_editor: bool,
    pub draft: bool,
}

impl OpenPrParams {
    /// Arguments following `gh pr`.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "create".to_string(),
            "--title".to_string(),
            self.title.clone(),
            "--body".to_string(),
            self.body.clone(),
            "--base".to_string(),
            self.base.clone(),
            "--head".to_string(),
            self.head.clone(),
        ];

        if self.use_editor {
            args.push("--editor".to_string());
        }

        if self.draft {
            args.push("--draft".to_string());
        }

        args
    }
}

/// The GitHub CLI.
#[derive(Debug, Clone)]
pub struct GitHubCli {
    tool: ExternalTool,
}

impl Default for GitHubCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubCli {
    pub fn new() -> Self {
        Self {
            tool: ExternalTool::gh(),
        }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            tool: ExternalTool::gh().in_dir(dir),
        }
    }

    /// `gh pr create ...` with the terminal handed over to `gh`.
    pub async fn create_pr(&self, ctx: &CallContext, params: &OpenPrParams) -> Result<(), ToolError> {
        self.tool
            .run(ctx, "pr", &params.args(), RunMode::Interactive)
            .await
            .map(|_| ())
    }
}
