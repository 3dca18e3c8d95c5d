//! `ditto commit`

use std::time::Duration;

use tracing::debug;

use crate::context::CallContext;
use crate::error::WorkflowError;
use crate::git::{CommitFlag, Git, GitOption};
use crate::llm::{CommitParams, GenerationBackend};

use super::spinner;

/// Flags and generation input for one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRequest {
    pub amend: bool,
    pub all: bool,
    pub issues: Vec<String>,
    pub additional_context: String,
}

impl CommitRequest {
    /// Diff options for the change set the commit will record.
    ///
    /// | amend | all | diff                  |
    /// |-------|-----|-----------------------|
    /// | no    | no  | `--staged`            |
    /// | yes   | no  | `--cached HEAD^`      |
    /// | no    | yes | `HEAD`                |
    /// | yes   | yes | `HEAD^`               |
    pub fn diff_options(&self) -> Vec<GitOption> {
        match (self.amend, self.all) {
            (false, false) => vec![GitOption::Staged],
            (true, false) => vec![GitOption::cached("HEAD^")],
            (false, true) => vec![GitOption::target("HEAD")],
            (true, true) => vec![GitOption::target("HEAD^")],
        }
    }

    pub fn empty_diff_message(&self) -> &'static str {
        if self.amend || self.all {
            "no changes to commit"
        } else {
            "no staged changes"
        }
    }

    pub fn flags(&self) -> Vec<CommitFlag> {
        let mut flags = Vec::new();
        if self.amend {
            flags.push(CommitFlag::Amend);
        }
        if self.all {
            flags.push(CommitFlag::All);
        }
        flags
    }
}

/// A generated message ready to hand to `git commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDraft {
    pub message: String,
    pub flags: Vec<CommitFlag>,
}

/// Collect the diff and generate a message for it.
///
/// An empty diff stops here with [`WorkflowError::EmptyInput`]; the backend is
/// never called.
pub async fn prepare_commit(
    ctx: &CallContext,
    git: &Git,
    backend: &dyn GenerationBackend,
    request: &CommitRequest,
    timeout: Duration,
) -> Result<CommitDraft, WorkflowError> {
    let diff = git.diff(ctx, &request.diff_options()).await?;
    if diff.trim().is_empty() {
        return Err(WorkflowError::EmptyInput(
            request.empty_diff_message().to_string(),
        ));
    }

    debug!(diff_len = diff.len(), "collected diff");

    let params = CommitParams {
        diff,
        issues: request.issues.clone(),
        additional_context: request.additional_context.clone(),
    };

    let generation_ctx = ctx.with_timeout(timeout);
    let pb = spinner("Generating commit message...");
    let result = backend
        .generate_commit_message(&generation_ctx, &params)
        .await;
    pb.finish_and_clear();

    Ok(CommitDraft {
        message: result?,
        flags: request.flags(),
    })
}

/// Generate a message and open `git commit` with it in the user's editor.
pub async fn run_commit(
    ctx: &CallContext,
    git: &Git,
    backend: &dyn GenerationBackend,
    request: &CommitRequest,
    timeout: Duration,
) -> Result<(), WorkflowError> {
    let draft = prepare_commit(ctx, git, backend, request, timeout).await?;
    git.commit_with_message(ctx, &draft.message, &draft.flags)
        .await?;
    Ok(())
}
