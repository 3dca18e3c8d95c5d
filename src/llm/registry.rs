//! Name-to-backend lookup.
//!
//! ```text
//! main
//!   Settings::from_env()
//!   ProviderRegistry::builtin(&settings)
//!     gemini::register  -> gemini, gemini-flash, gemini-flash-lite, gemini-cli
//!     ollama::register  -> ollama
//!   registry.get(--provider)   fails closed on unknown names
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::Settings;
use crate::error::ProviderError;

use super::provider::GenerationBackend;

/// Backends keyed by provider name.
///
/// Built once at startup and only read afterwards.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    backends: HashMap<String, Arc<dyn GenerationBackend>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every backend compiled into this binary.
    pub fn builtin(settings: &Settings) -> Self {
        let mut registry = Self::new();
        crate::gemini::register(&mut registry, settings);
        crate::ollama::register(&mut registry, settings);
        registry
    }

    /// Register `backend` under `name`. A later registration replaces an
    /// earlier one with the same name.
    pub fn register(&mut self, name: impl Into<String>, backend: Arc<dyn GenerationBackend>) {
        let name = name.into();
        if self.backends.insert(name.clone(), backend).is_some() {
            debug!(provider = %name, "replacing previously registered provider");
        }
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn GenerationBackend>, ProviderError> {
        self.backends
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::NoProviderRegistered {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
