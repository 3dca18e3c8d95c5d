//! HTTP client for a local Ollama daemon.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::CallContext;
use crate::error::ProviderError;
use crate::llm::prompt::full_commit_prompt;
use crate::llm::{CommitParams, GenerationBackend, Operation, PrParams};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    raw: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Backend talking to `{base_url}/api/generate`.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    name: String,
    model: String,
    base_url: String,
    http: Client,
}

impl OllamaBackend {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        http: Client,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            base_url: base_url.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }

    async fn generate(&self, ctx: &CallContext, prompt: &str) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            raw: false,
        };

        debug!(
            provider = %self.name,
            model = %self.model,
            prompt_len = prompt.len(),
            "sending generate request"
        );

        let request = async {
            let response = self
                .http
                .post(self.endpoint())
                .json(&body)
                .send()
                .await
                .map_err(ProviderError::Http)?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::HttpStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            let text = response.text().await.map_err(ProviderError::Http)?;
            let parsed: GenerateResponse = serde_json::from_str(&text)
                .map_err(|e| ProviderError::InvalidJson(format!("{e}. Content: {text}")))?;

            if parsed.response.trim().is_empty() {
                return Err(ProviderError::MalformedResponse(format!(
                    "{} returned an empty response",
                    self.model
                )));
            }
            Ok(parsed.response)
        };

        ctx.run(request).await?
    }
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    async fn generate_commit_message(
        &self,
        ctx: &CallContext,
        params: &CommitParams,
    ) -> Result<String, ProviderError> {
        self.generate(ctx, &full_commit_prompt(params)).await
    }

    async fn generate_pr(
        &self,
        _ctx: &CallContext,
        _params: &PrParams,
    ) -> Result<String, ProviderError> {
        // TODO: pick a PR-capable default model before enabling this.
        Err(ProviderError::NotSupported {
            provider: self.name.clone(),
            operation: Operation::PullRequest,
        })
    }
}
