//! Gemini REST API backend (`models/{model}:generateContent`).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GEMINI_API_KEY_ENV_VAR;
use crate::context::CallContext;
use crate::error::ProviderError;
use crate::llm::prompt::{PromptKind, build_commit_context, build_pr_context, build_system_prompt};
use crate::llm::{CommitParams, GenerationBackend, PrParams};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// One Gemini model reached over HTTPS.
#[derive(Debug, Clone)]
pub struct GeminiApi {
    name: String,
    model: String,
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl GeminiApi {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: Option<String>,
        http: Client,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            base_url: base_url.into(),
            api_key,
            http,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate(
        &self,
        ctx: &CallContext,
        system_prompt: &str,
        user_content: &str,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: self.name.clone(),
                env_var: GEMINI_API_KEY_ENV_VAR,
            })?;

        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![TextPart {
                    text: system_prompt,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart { text: user_content }],
            }],
        };

        debug!(
            provider = %self.name,
            model = %self.model,
            system_len = system_prompt.len(),
            content_len = user_content.len(),
            "sending generateContent request"
        );

        let request = async {
            let response = self
                .http
                .post(self.endpoint())
                .header("x-goog-api-key", api_key)
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
            let parsed: GenerateContentResponse = serde_json::from_str(&text)
                .map_err(|e| ProviderError::InvalidJson(format!("{e}. Content: {text}")))?;

            parsed.into_text().ok_or_else(|| {
                ProviderError::MalformedResponse(format!(
                    "{} returned no candidate text",
                    self.model
                ))
            })
        };

        ctx.run(request).await?
    }
}

#[async_trait]
impl GenerationBackend for GeminiApi {
    async fn generate_commit_message(
        &self,
        ctx: &CallContext,
        params: &CommitParams,
    ) -> Result<String, ProviderError> {
        let system = build_system_prompt(PromptKind::Commit, &params.additional_context, None);
        self.generate(ctx, &system, &build_commit_context(params))
            .await
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
        self.generate(ctx, &system, &build_pr_context(params)).await
    }
}
