//! `ditto pr`

use std::time::Duration;

use tracing::debug;

use crate::context::CallContext;
use crate::error::WorkflowError;
use crate::git::{Git, GitHubCli, GitOption, OpenPrParams};
use crate::llm::{GenerationBackend, PrParams, PrText};
use crate::template::find_pr_template;

use super::spinner;

pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Branches, template choice and generation input for one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRequest {
    pub base: String,
    /// `None` uses the current branch.
    pub head: Option<String>,
    pub no_template: bool,
    pub draft: bool,
    pub issues: Vec<String>,
    pub additional_context: String,
}

impl Default for PrRequest {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_BRANCH.to_string(),
            head: None,
            no_template: false,
            draft: false,
            issues: Vec::new(),
            additional_context: String::new(),
        }
    }
}

/// Gather branch history, generate a title and body, and build the
/// `gh pr create` parameters.
pub async fn prepare_pr(
    ctx: &CallContext,
    git: &Git,
    backend: &dyn GenerationBackend,
    request: &PrRequest,
    timeout: Duration,
) -> Result<OpenPrParams, WorkflowError> {
    let head = match request.head.as_deref().map(str::trim) {
        Some(head) if !head.is_empty() => head.to_string(),
        _ => git.current_branch(ctx).await?,
    };
    if head.is_empty() {
        return Err(WorkflowError::EmptyInput(
            "no head branch: HEAD is detached, pass --head".to_string(),
        ));
    }

    let range = GitOption::branches(&request.base, &head);

    let log = git.log(ctx, std::slice::from_ref(&range)).await?;
    if log.trim().is_empty() {
        return Err(WorkflowError::EmptyInput(format!(
            "no commits between {} and {}",
            request.base, head
        )));
    }

    let diff_stats = git.diff(ctx, &[GitOption::Stats, range]).await?;

    let template = if request.no_template {
        None
    } else {
        let root = git.root(ctx).await?;
        find_pr_template(&root)?
    };

    debug!(
        base = %request.base,
        head = %head,
        log_len = log.len(),
        has_template = template.is_some(),
        "collected pull request input"
    );

    let params = PrParams {
        head_branch: head.clone(),
        base_branch: request.base.clone(),
        log,
        diff_stats,
        template,
        issues: request.issues.clone(),
        additional_context: request.additional_context.clone(),
    };

    let generation_ctx = ctx.with_timeout(timeout);
    let pb = spinner("Generating PR...");
    let result = backend.generate_pr(&generation_ctx, &params).await;
    pb.finish_and_clear();

    let text = PrText::parse(&result?)?;

    Ok(OpenPrParams {
        title: text.title,
        body: text.body,
        base: request.base.clone(),
        head,
        use_editor: true,
        draft: request.draft,
    })
}

/// Generate a pull request and open it with `gh`, which shows the editor first.
pub async fn run_pr(
    ctx: &CallContext,
    git: &Git,
    gh: &GitHubCli,
    backend: &dyn GenerationBackend,
    request: &PrRequest,
    timeout: Duration,
) -> Result<(), WorkflowError> {
    let params = prepare_pr(ctx, git, backend, request, timeout).await?;
    gh.create_pr(ctx, &params).await?;
    Ok(())
}
