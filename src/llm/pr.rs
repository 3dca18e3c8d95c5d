//! Splitting generated pull request text into title and body.

use crate::error::ProviderError;

/// A generated pull request, split at the first line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrText {
    pub title: String,
    pub body: String,
}

impl PrText {
    /// Split `raw` into a title (first line) and body (the rest).
    ///
    /// Both halves are trimmed. Text without a line break is a
    /// [`ProviderError::MalformedResponse`], not a title-only PR.
    pub fn parse(raw: &str) -> Result<Self, ProviderError> {
        let (title, body) = raw.split_once('\n').ok_or_else(|| {
            ProviderError::MalformedResponse(format!(
                "expected a title line followed by a body, got a single line: {}",
                raw.chars().take(200).collect::<String>()
            ))
        })?;

        Ok(Self {
            title: title.trim().to_string(),
            body: body.trim().to_string(),
        })
    }
}
