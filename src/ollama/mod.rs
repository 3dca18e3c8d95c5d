//! Local Ollama daemon backend.

pub mod client;

use std::sync::Arc;

use crate::config::Settings;
use crate::llm::ProviderRegistry;

pub use client::OllamaBackend;

/// Model tuned for writing commit messages from diffs.
pub const GIT_COMMIT_MESSAGE_MODEL: &str = "tavernari/git-commit-message";

pub fn register(registry: &mut ProviderRegistry, settings: &Settings) {
    registry.register(
        "ollama",
        Arc::new(OllamaBackend::new(
            "ollama",
            GIT_COMMIT_MESSAGE_MODEL,
            settings.ollama_host.clone(),
            crate::http_client(),
        )),
    );
}
