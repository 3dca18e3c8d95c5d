//! The contract every generation backend implements.

use std::fmt;

use async_trait::async_trait;

use crate::context::{CallContext, Interrupted};
use crate::error::ProviderError;

/// Input for one commit-message generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitParams {
    pub diff: String,
    pub issues: Vec<String>,
    pub additional_context: String,
}

/// Input for one pull-request generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrParams {
    pub head_branch: String,
    pub base_branch: String,
    pub log: String,
    pub diff_stats: String,
    pub template: Option<String>,
    pub issues: Vec<String>,
    pub additional_context: String,
}

/// The two generation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CommitMessage,
    PullRequest,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CommitMessage => "commit message generation",
            Operation::PullRequest => "pull request generation",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pluggable model backend.
///
/// Implementations make exactly one outbound call per operation, never retry,
/// and return [`ProviderError::Canceled`] or [`ProviderError::Timeout`] when
/// `ctx` interrupts them. A backend that cannot perform an operation returns
/// [`ProviderError::NotSupported`].
///
/// For [`generate_pr`](Self::generate_pr) the first line of the returned text
/// is the title and the remainder is the body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate_commit_message(
        &self,
        ctx: &CallContext,
        params: &CommitParams,
    ) -> Result<String, ProviderError>;

    async fn generate_pr(&self, ctx: &CallContext, params: &PrParams)
    -> Result<String, ProviderError>;
}

impl From<Interrupted> for ProviderError {
    fn from(interrupted: Interrupted) -> Self {
        match interrupted {
            Interrupted::Canceled => ProviderError::Canceled,
            Interrupted::TimedOut(timeout) => ProviderError::Timeout(timeout.as_secs()),
        }
    }
}
