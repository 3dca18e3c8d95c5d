//! Gemini backends: the hosted REST API and the `gemini` CLI.

pub mod client;
pub mod subprocess;

use std::sync::Arc;

use crate::config::Settings;
use crate::llm::ProviderRegistry;

pub use client::GeminiApi;
pub use subprocess::GeminiCli;

pub const PRO_MODEL: &str = "gemini-2.5-pro";
pub const FLASH_MODEL: &str = "gemini-2.5-flash";
pub const FLASH_LITE_MODEL: &str = "gemini-2.5-flash-lite";

/// Provider names for the hosted API, paired with their model.
const API_PROVIDERS: [(&str, &str); 3] = [
    ("gemini", PRO_MODEL),
    ("gemini-flash", FLASH_MODEL),
    ("gemini-flash-lite", FLASH_LITE_MODEL),
];

pub fn register(registry: &mut ProviderRegistry, settings: &Settings) {
    let http = crate::http_client();

    for (name, model) in API_PROVIDERS {
        registry.register(
            name,
            Arc::new(GeminiApi::new(
                name,
                model,
                settings.gemini_base_url.clone(),
                settings.gemini_api_key.clone(),
                http.clone(),
            )),
        );
    }

    registry.register("gemini-cli", Arc::new(GeminiCli::new("gemini", PRO_MODEL)));
}
