//! Error types for ditto modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::llm::Operation;

/// Errors from invoking an external tool such as `git` or `gh`.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("`{program}` was not found in PATH")]
    NotFound { program: String },

    #[error("Failed to spawn `{program}`: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program} {subcommand}` exited with {}: {stderr}",
             exit_code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    Failed {
        program: String,
        subcommand: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("`{program} {subcommand}` was canceled")]
    Canceled { program: String, subcommand: String },

    #[error("`{program} {subcommand}` timed out after {secs} seconds")]
    TimedOut {
        program: String,
        subcommand: String,
        secs: u64,
    },
}

/// Errors from provider lookup and generation backends.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No provider registered under '{name}'. Available: {available}")]
    NoProviderRegistered { name: String, available: String },

    #[error("{operation} is not supported by the '{provider}' provider")]
    NotSupported {
        provider: String,
        operation: Operation,
    },

    #[error("Model returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("Generation was canceled")]
    Canceled,

    #[error("Generation timed out after {0} seconds")]
    Timeout(u64),

    #[error("Missing API key for '{provider}'. Set {env_var}")]
    MissingApiKey {
        provider: String,
        env_var: &'static str,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Provider responded with HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Provider returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    Cli(ToolError),

    #[error("Failed to prepare prompt file: {0}")]
    PromptFile(#[source] std::io::Error),
}

/// Errors from the commit and pull-request workflows.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("{0}")]
    EmptyInput(String),

    #[error(transparent)]
    Git(#[from] ToolError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to read PR template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failure_message_includes_stderr_and_code() {
        let err = ToolError::Failed {
            program: "git".to_string(),
            subcommand: "diff".to_string(),
            exit_code: Some(128),
            stderr: "fatal: bad revision 'HEAD^'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git diff"));
        assert!(msg.contains("code 128"));
        assert!(msg.contains("bad revision"));
    }

    #[test]
    fn test_tool_failure_without_exit_code() {
        let err = ToolError::Failed {
            program: "gh".to_string(),
            subcommand: "pr".to_string(),
            exit_code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("unknown status"));
    }

    #[test]
    fn test_not_supported_names_operation_and_provider() {
        let err = ProviderError::NotSupported {
            provider: "ollama".to_string(),
            operation: Operation::PullRequest,
        };
        let msg = err.to_string();
        assert!(msg.contains("ollama"));
        assert!(msg.contains("pull request generation"));
    }

    #[test]
    fn test_workflow_error_is_transparent_over_provider() {
        let err = WorkflowError::from(ProviderError::Timeout(60));
        assert_eq!(err.to_string(), "Generation timed out after 60 seconds");
    }
}
