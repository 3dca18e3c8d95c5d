//! Provider registry, backend contract and prompt construction.

pub mod pr;
pub mod prompt;
pub mod provider;
pub mod registry;

pub use pr::PrText;
pub use prompt::{
    PromptKind, build_commit_context, build_pr_context, build_system_prompt, full_commit_prompt,
    full_pr_prompt,
};
pub use provider::{CommitParams, GenerationBackend, Operation, PrParams};
pub use registry::ProviderRegistry;
