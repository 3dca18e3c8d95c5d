//! ditto - A CLI tool that writes git commit messages and pull requests with LLMs.
//!
//! # Overview
//!
//! ditto collects a diff (or a branch log for pull requests), asks the selected
//! model backend for text, and hands the result back to `git commit` or
//! `gh pr create` with the user's editor open for review.
//!
//! Backends are looked up by name in a [`ProviderRegistry`] built once at
//! startup. Every outbound call takes a [`CallContext`] so Ctrl+C and the
//! generation timeout stop it cleanly.

pub mod config;
pub mod context;
pub mod error;
pub mod gemini;
pub mod git;
pub mod llm;
pub mod ollama;
pub mod template;
pub mod workflow;

// Re-export commonly used types
pub use config::Settings;
pub use context::{CallContext, Interrupted};
pub use error::{ProviderError, ToolError, WorkflowError};
pub use git::{CommitFlag, Git, GitHubCli, GitOption, OpenPrParams, compose};
pub use llm::{CommitParams, GenerationBackend, PrParams, PrText, ProviderRegistry};

/// HTTP client shared by the HTTP backends.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to build HTTP client ({}), using defaults", e);
            reqwest::Client::new()
        })
}
