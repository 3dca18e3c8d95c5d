//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};

use ditto::context::CallContext;
use ditto::error::ProviderError;
use ditto::git::Git;
use ditto::llm::{CommitParams, GenerationBackend, PrParams};

/// Returns true when the `git` binary is available; tests that shell out skip otherwise.
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository whose first branch is `main`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        repo.set_head("refs/heads/main")
            .expect("Failed to point HEAD at main");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A git gateway running inside this repository.
    pub fn git(&self) -> Git {
        Git::in_dir(self.dir.path())
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write `content` to `relative` in the working tree.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Add `relative` to the index.
    pub fn stage(&self, relative: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(Path::new(relative))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit the current index on HEAD. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Write, stage and commit one file.
    pub fn commit_file(&self, relative: &str, content: &str, message: &str) -> Oid {
        self.write_file(relative, content);
        self.stage(relative);
        self.commit_index(message)
    }

    /// Create a branch at HEAD.
    pub fn branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        self.repo
            .branch(name, &head, false)
            .expect("Failed to create branch");
    }

    /// Switch HEAD and the working tree to `name`.
    pub fn checkout(&self, name: &str) {
        self.repo
            .set_head(&format!("refs/heads/{name}"))
            .expect("Failed to set HEAD");
        self.repo
            .checkout_head(Some(git2::build::CheckoutBuilder::new().force()))
            .expect("Failed to checkout HEAD");
    }

    /// Detach HEAD at the current commit.
    pub fn detach(&self) {
        let oid = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.target())
            .expect("Failed to resolve HEAD");
        self.repo.set_head_detached(oid).expect("Failed to detach HEAD");
    }
}

/// Write an executable shell script into `dir` and return its path.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat script")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to chmod script");
    path
}

/// What a [`StubBackend`] was called with.
#[derive(Debug, Clone, PartialEq)]
pub enum StubCall {
    Commit(CommitParams),
    Pr(PrParams),
}

/// A backend returning a fixed reply, optionally after a delay, and
/// recording every call.
pub struct StubBackend {
    reply: Result<String, String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<StubCall>>,
}

impl StubBackend {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with a [`ProviderError::MalformedResponse`] carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<StubCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, ctx: &CallContext, call: StubCall) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(call);

        let delay = self.delay;
        let reply = self.reply.clone();
        ctx.run(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            reply.map_err(ProviderError::MalformedResponse)
        })
        .await?
    }
}

#[async_trait]
impl GenerationBackend for StubBackend {
    async fn generate_commit_message(
        &self,
        ctx: &CallContext,
        params: &CommitParams,
    ) -> Result<String, ProviderError> {
        self.respond(ctx, StubCall::Commit(params.clone())).await
    }

    async fn generate_pr(
        &self,
        ctx: &CallContext,
        params: &PrParams,
    ) -> Result<String, ProviderError> {
        self.respond(ctx, StubCall::Pr(params.clone())).await
    }
}
