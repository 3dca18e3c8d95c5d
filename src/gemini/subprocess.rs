//! `gemini` CLI backend.
//!
//! The system prompt goes into a scratch file named by `GEMINI_SYSTEM_MD`; the
//! context block is written to stdin. The scratch file lives exactly as long as
//! the call, including when the call is canceled.

use std::io::{self, Write};
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::context::CallContext;
use crate::error::{ProviderError, ToolError};
use crate::llm::prompt::{PromptKind, build_commit_context, build_pr_context, build_system_prompt};
use crate::llm::{CommitParams, GenerationBackend, PrParams};

/// Environment variable the CLI reads its system prompt path from.
pub const SYSTEM_MD_ENV_VAR: &str = "GEMINI_SYSTEM_MD";

#[derive(Debug, Clone)]
pub struct GeminiCli {
    program: String,
    model: String,
}

impl GeminiCli {
    pub fn new(program: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            model: model.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn subcommand(&self) -> String {
        format!("-m {}", self.model)
    }

    async fn invoke(
        &self,
        ctx: &CallContext,
        system_prompt: &str,
        input: &str,
    ) -> Result<String, ProviderError> {
        if which::which(&self.program).is_err() {
            return Err(ProviderError::Cli(ToolError::NotFound {
                program: self.program.clone(),
            }));
        }

        let mut prompt_file = NamedTempFile::new().map_err(ProviderError::PromptFile)?;
        prompt_file
            .write_all(system_prompt.as_bytes())
            .and_then(|()| prompt_file.flush())
            .map_err(ProviderError::PromptFile)?;

        debug!(
            program = %self.program,
            model = %self.model,
            prompt_file = %prompt_file.path().display(),
            input_len = input.len(),
            "running gemini CLI"
        );

        let mut cmd = Command::new(&self.program);
        cmd.arg("-m")
            .arg(&self.model)
            .env(SYSTEM_MD_ENV_VAR, prompt_file.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let call = async {
            let mut child = cmd.spawn().map_err(|e| self.spawn_failed(e))?;

            // Feed stdin while stdout and stderr are drained, so neither side
            // blocks on a full pipe. Dropping the handle closes stdin.
            let stdin = child.stdin.take();
            let feed = async move {
                if let Some(mut stdin) = stdin {
                    // A CLI that exits without reading stdin is judged by its status.
                    match stdin.write_all(input.as_bytes()).await {
                        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
                        _ => {}
                    }
                }
                Ok::<(), io::Error>(())
            };

            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            let output = output.map_err(|e| self.spawn_failed(e))?;
            fed.map_err(|e| self.spawn_failed(e))?;
            Ok(output)
        };

        let output = ctx.run(call).await?.map_err(ProviderError::Cli)?;
        drop(prompt_file);

        if !output.status.success() {
            return Err(ProviderError::Cli(ToolError::Failed {
                program: self.program.clone(),
                subcommand: self.subcommand(),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(ProviderError::MalformedResponse(format!(
                "`{}` produced no output",
                self.program
            )));
        }
        Ok(text)
    }

    fn spawn_failed(&self, err: io::Error) -> ToolError {
        if err.kind() == io::ErrorKind::NotFound {
            ToolError::NotFound {
                program: self.program.clone(),
            }
        } else {
            ToolError::SpawnFailed {
                program: self.program.clone(),
                source: err,
            }
        }
    }
}

#[async_trait]
impl GenerationBackend for GeminiCli {
    async fn generate_commit_message(
        &self,
        ctx: &CallContext,
        params: &CommitParams,
    ) -> Result<String, ProviderError> {
        let system = build_system_prompt(PromptKind::Commit, &params.additional_context, None);
        self.invoke(ctx, &system, &build_commit_context(params)).await
    }

    async fn generate_pr(
        &self,
        ctx: &CallContext,
        params: &PrParams,
    ) -> Result<String, ProviderError> {
        let system = build_system_prompt(
            PromptKind::PullRequest,
            &params.additional_context,
            params.template.as_deref(),
        );
        self.invoke(ctx, &system, &build_pr_context(params)).await
    }
}
