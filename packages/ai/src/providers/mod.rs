//! LLM provider abstraction and implementations.
//!
//! Every supported backend speaks the `OpenAI` chat completions protocol,
//! so a single [`openai::OpenAiCompatibleProvider`] covers Groq, `OpenAI`,
//! and local servers. The trait is the seam tests use to substitute a
//! canned provider.

pub mod openai;

use std::time::Duration;

use crate::AiError;

/// Default per-request timeout for the narrative call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Trait for LLM providers.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends `prompt` as a single user message, asking for a JSON object
    /// response, and returns the raw completion text.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the request fails or the response carries no
    /// completion.
    async fn complete_json(&self, prompt: &str) -> Result<String, AiError>;
}

/// Connection settings for an `OpenAI`-compatible endpoint.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL without the trailing `/chat/completions`.
    pub base_url: String,
    pub timeout: Duration,
}

/// Creates an LLM provider based on environment variables.
///
/// See [`provider_config_with`] for the variables read.
///
/// # Errors
///
/// Returns [`AiError::Config`] if the credential is missing or empty or the
/// provider name is unknown, and [`AiError::Http`] if the HTTP client cannot
/// be built.
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, AiError> {
    create_provider_with(|name| std::env::var(name).ok())
}

/// Creates an LLM provider from settings resolved through `lookup`.
///
/// # Errors
///
/// Same as [`create_provider_from_env`].
pub fn create_provider_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Box<dyn LlmProvider>, AiError> {
    let config = provider_config_with(lookup)?;
    Ok(Box::new(openai::OpenAiCompatibleProvider::new(config)?))
}

/// Resolves the provider settings, reading each variable through `lookup`.
///
/// `AI_PROVIDER` selects the backend (`groq` by default, or `openai`).
/// The credential comes from `GROQ_API_KEY` / `OPENAI_API_KEY`;
/// `AI_MODEL`, `AI_BASE_URL` and `AI_TIMEOUT_SECS` override the defaults.
///
/// # Errors
///
/// Returns [`AiError::Config`] if the credential is missing or blank or the
/// provider name is unknown.
pub fn provider_config_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ProviderConfig, AiError> {
    let provider = lookup("AI_PROVIDER").unwrap_or_else(|| "groq".to_string());

    let (key_var, base_url, model) = match provider.to_lowercase().as_str() {
        "groq" => ("GROQ_API_KEY", GROQ_BASE_URL, GROQ_DEFAULT_MODEL),
        "openai" | "gpt" => ("OPENAI_API_KEY", OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL),
        other => {
            return Err(AiError::Config {
                message: format!("Unknown AI provider: {other}. Use 'groq' or 'openai'."),
            });
        }
    };

    let api_key = lookup(key_var)
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            log::error!("{key_var} environment variable not found");
            AiError::Config {
                message: "API key is not configured on the server.".to_string(),
            }
        })?;

    let timeout_secs = lookup("AI_TIMEOUT_SECS")
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let config = ProviderConfig {
        api_key,
        model: lookup("AI_MODEL").unwrap_or_else(|| model.to_string()),
        base_url: lookup("AI_BASE_URL").unwrap_or_else(|| base_url.to_string()),
        timeout: Duration::from_secs(timeout_secs),
    };

    log::info!(
        "Narrative provider: {provider} (model {}, timeout {timeout_secs}s)",
        config.model
    );

    Ok(config)
}
