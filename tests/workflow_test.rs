//! End-to-end tests for the commit and pull request flows up to the point
//! where `git commit` / `gh pr create` would take over the terminal.

mod common;

use std::time::Duration;

use common::{StubBackend, StubCall, TestRepo, git_available};
use ditto::context::CallContext;
use ditto::error::{ProviderError, WorkflowError};
use ditto::git::CommitFlag;
use ditto::workflow::{CommitRequest, PrRequest, prepare_commit, prepare_pr};

const TIMEOUT: Duration = Duration::from_secs(5);

macro_rules! require_git {
    () => {
        if !git_available() {
            eprintln!("git not installed, skipping");
            return;
        }
    };
}

/// `main` with one commit, then `feature` checked out with two more.
fn feature_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "# demo\n", "chore: init");
    repo.branch("feature");
    repo.checkout("feature");
    repo.commit_file("src/login.rs", "fn login() {}\n", "feat: add login");
    repo.commit_file("src/login.rs", "fn login() -> bool { true }\n", "fix: login result");
    repo
}

#[tokio::test]
async fn test_commit_sends_staged_diff_to_backend() {
    require_git!();
    let repo = TestRepo::new();
    repo.write_file("notes.txt", "remember the milk\n");
    repo.stage("notes.txt");

    let backend = StubBackend::replying("docs: add notes");
    let request = CommitRequest {
        issues: vec!["#9".to_string()],
        additional_context: "lowercase only".to_string(),
        ..Default::default()
    };

    let draft = prepare_commit(&CallContext::new(), &repo.git(), &backend, &request, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(draft.message, "docs: add notes");
    assert!(draft.flags.is_empty());

    match backend.calls().as_slice() {
        [StubCall::Commit(params)] => {
            assert!(params.diff.contains("+remember the milk"));
            assert_eq!(params.issues, vec!["#9"]);
            assert_eq!(params.additional_context, "lowercase only");
        }
        other => panic!("Expected one commit call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_commit_with_nothing_staged_is_empty_input() {
    require_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "init");

    let backend = StubBackend::replying("unused");
    let result = prepare_commit(
        &CallContext::new(),
        &repo.git(),
        &backend,
        &CommitRequest::default(),
        TIMEOUT,
    )
    .await;

    match result {
        Err(WorkflowError::EmptyInput(msg)) => assert_eq!(msg, "no staged changes"),
        other => panic!("Expected EmptyInput, got {:?}", other),
    }
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_commit_all_on_clean_tree_is_empty_input() {
    require_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "init");

    let backend = StubBackend::replying("unused");
    let request = CommitRequest {
        all: true,
        ..Default::default()
    };
    let result = prepare_commit(&CallContext::new(), &repo.git(), &backend, &request, TIMEOUT).await;

    match result {
        Err(WorkflowError::EmptyInput(msg)) => assert_eq!(msg, "no changes to commit"),
        other => panic!("Expected EmptyInput, got {:?}", other),
    }
}

#[tokio::test]
async fn test_commit_all_includes_unstaged_tracked_changes() {
    require_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "init");
    repo.write_file("a.txt", "edited\n");

    let backend = StubBackend::replying("fix: edit a");
    let request = CommitRequest {
        all: true,
        ..Default::default()
    };
    let draft = prepare_commit(&CallContext::new(), &repo.git(), &backend, &request, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(draft.flags, vec![CommitFlag::All]);
    match backend.calls().as_slice() {
        [StubCall::Commit(params)] => assert!(params.diff.contains("+edited")),
        other => panic!("Expected one commit call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_amend_diffs_against_parent_of_head() {
    require_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "init");
    repo.commit_file("b.txt", "b\n", "add b");

    let backend = StubBackend::replying("feat: add b");
    let request = CommitRequest {
        amend: true,
        ..Default::default()
    };
    let draft = prepare_commit(&CallContext::new(), &repo.git(), &backend, &request, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(draft.flags, vec![CommitFlag::Amend]);
    match backend.calls().as_slice() {
        [StubCall::Commit(params)] => {
            assert!(params.diff.contains("b/b.txt"));
            assert!(!params.diff.contains("b/a.txt"));
        }
        other => panic!("Expected one commit call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_backend_hits_generation_timeout() {
    require_git!();
    let repo = TestRepo::new();
    repo.write_file("a.txt", "a\n");
    repo.stage("a.txt");

    let backend = StubBackend::replying("too late").with_delay(Duration::from_secs(30));
    let result = prepare_commit(
        &CallContext::new(),
        &repo.git(),
        &backend,
        &CommitRequest::default(),
        Duration::from_secs(1),
    )
    .await;

    assert!(matches!(
        result,
        Err(WorkflowError::Provider(ProviderError::Timeout(1)))
    ));
}

#[tokio::test]
async fn test_backend_failure_propagates_unchanged() {
    require_git!();
    let repo = TestRepo::new();
    repo.write_file("a.txt", "a\n");
    repo.stage("a.txt");

    let backend = StubBackend::failing("model refused");
    let result = prepare_commit(
        &CallContext::new(),
        &repo.git(),
        &backend,
        &CommitRequest::default(),
        TIMEOUT,
    )
    .await;

    match result {
        Err(WorkflowError::Provider(ProviderError::MalformedResponse(msg))) => {
            assert_eq!(msg, "model refused");
        }
        other => panic!("Expected Provider(MalformedResponse), got {:?}", other),
    }
}

#[tokio::test]
async fn test_pr_collects_history_stats_and_template() {
    require_git!();
    let repo = feature_repo();
    repo.write_file(".github/pull_request_template.md", "## Summary\n\n## Testing\n");

    let backend = StubBackend::replying("feat: add login\n\n## Summary\nLogin.\n\n## Testing\nManual.");
    let request = PrRequest {
        issues: vec!["#40".to_string()],
        draft: true,
        ..Default::default()
    };

    let open = prepare_pr(&CallContext::new(), &repo.git(), &backend, &request, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(open.title, "feat: add login");
    assert_eq!(open.body, "## Summary\nLogin.\n\n## Testing\nManual.");
    assert_eq!(open.base, "main");
    assert_eq!(open.head, "feature");
    assert!(open.use_editor);
    assert!(open.draft);

    match backend.calls().as_slice() {
        [StubCall::Pr(params)] => {
            assert_eq!(params.base_branch, "main");
            assert_eq!(params.head_branch, "feature");
            assert!(params.log.contains("feat: add login"));
            assert!(params.log.contains("fix: login result"));
            assert!(!params.log.contains("chore: init"));
            assert!(params.diff_stats.contains("src/login.rs"));
            assert_eq!(
                params.template.as_deref(),
                Some("## Summary\n\n## Testing\n")
            );
            assert_eq!(params.issues, vec!["#40"]);
        }
        other => panic!("Expected one PR call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pr_no_template_skips_probe() {
    require_git!();
    let repo = feature_repo();
    repo.write_file("PULL_REQUEST_TEMPLATE.md", "## Summary\n");

    let backend = StubBackend::replying("Title\nBody");
    let request = PrRequest {
        no_template: true,
        ..Default::default()
    };
    prepare_pr(&CallContext::new(), &repo.git(), &backend, &request, TIMEOUT)
        .await
        .unwrap();

    match backend.calls().as_slice() {
        [StubCall::Pr(params)] => assert_eq!(params.template, None),
        other => panic!("Expected one PR call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pr_explicit_head_overrides_current_branch() {
    require_git!();
    let repo = feature_repo();
    repo.checkout("main");

    let backend = StubBackend::replying("Title\nBody");
    let request = PrRequest {
        head: Some("feature".to_string()),
        ..Default::default()
    };
    let open = prepare_pr(&CallContext::new(), &repo.git(), &backend, &request, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(open.head, "feature");
}

#[tokio::test]
async fn test_pr_without_new_commits_is_empty_input() {
    require_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "init");
    repo.branch("feature");
    repo.checkout("feature");

    let backend = StubBackend::replying("unused");
    let result = prepare_pr(
        &CallContext::new(),
        &repo.git(),
        &backend,
        &PrRequest::default(),
        TIMEOUT,
    )
    .await;

    assert!(matches!(result, Err(WorkflowError::EmptyInput(_))));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_pr_on_detached_head_needs_explicit_head() {
    require_git!();
    let repo = feature_repo();
    repo.detach();

    let backend = StubBackend::replying("unused");
    let result = prepare_pr(
        &CallContext::new(),
        &repo.git(),
        &backend,
        &PrRequest::default(),
        TIMEOUT,
    )
    .await;

    assert!(matches!(result, Err(WorkflowError::EmptyInput(_))));
}

#[tokio::test]
async fn test_pr_single_line_reply_is_malformed() {
    require_git!();
    let repo = feature_repo();

    let backend = StubBackend::replying("just a title");
    let result = prepare_pr(
        &CallContext::new(),
        &repo.git(),
        &backend,
        &PrRequest::default(),
        TIMEOUT,
    )
    .await;

    assert!(matches!(
        result,
        Err(WorkflowError::Provider(ProviderError::MalformedResponse(_)))
    ));
}

#[tokio::test]
async fn test_cancelled_run_stops_before_generation() {
    require_git!();
    let repo = TestRepo::new();
    repo.write_file("a.txt", "a\n");
    repo.stage("a.txt");

    let ctx = CallContext::new();
    ctx.cancel();

    let backend = StubBackend::replying("unused");
    let result = prepare_commit(&ctx, &repo.git(), &backend, &CommitRequest::default(), TIMEOUT).await;

    assert!(matches!(result, Err(WorkflowError::Git(_))));
    assert!(backend.calls().is_empty());
}
