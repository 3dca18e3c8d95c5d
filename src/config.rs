//! Runtime settings read from the environment.
//!
//! A `.env` file in the working directory is loaded by `main` before
//! [`Settings::from_env`] runs, so both sources behave the same.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Default timeout for the generation call (1 minute).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the generation timeout, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "DITTO_TIMEOUT";

pub const OLLAMA_HOST_ENV_VAR: &str = "OLLAMA_HOST";
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

pub const GEMINI_API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
pub const GOOGLE_API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";
pub const GEMINI_BASE_URL_ENV_VAR: &str = "GEMINI_BASE_URL";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Settings consumed by the backends and the workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub timeout: Duration,
    pub ollama_host: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            timeout: get_timeout(),
            ollama_host: non_empty_var(OLLAMA_HOST_ENV_VAR)
                .unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
            gemini_api_key: non_empty_var(GEMINI_API_KEY_ENV_VAR)
                .or_else(|| non_empty_var(GOOGLE_API_KEY_ENV_VAR)),
            gemini_base_url: non_empty_var(GEMINI_BASE_URL_ENV_VAR)
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get the configured generation timeout.
///
/// Logs a warning if the environment variable is set but is not a positive
/// number of seconds, then falls back to the default.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
