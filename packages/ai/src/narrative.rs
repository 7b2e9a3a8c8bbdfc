//! Narrative client: one JSON-mode completion per prompt.

use crate::AiError;
use crate::providers::{self, LlmProvider};

/// Sends prompts to the configured provider and parses the JSON reply.
///
/// A client built without a usable provider (no credential, unknown
/// provider name) still exists; every call then fails with
/// [`AiError::Config`] without touching the network.
pub struct NarrativeClient {
    provider: Result<Box<dyn LlmProvider>, String>,
}

impl NarrativeClient {
    /// Wraps an already-built provider.
    #[must_use]
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            provider: Ok(provider),
        }
    }

    /// A client whose calls always fail with a configuration error
    /// carrying `message`.
    #[must_use]
    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self {
            provider: Err(message.into()),
        }
    }

    /// Builds the client from environment variables.
    ///
    /// Configuration problems are logged and deferred to call time, so a
    /// missing credential never prevents the server from starting.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the client from settings read through `lookup` (see
    /// [`providers::provider_config_with`]).
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match providers::create_provider_with(lookup) {
            Ok(provider) => Self::new(provider),
            Err(e) => {
                log::warn!("Narrative generation unavailable: {e}");
                Self::unconfigured(e.to_string())
            }
        }
    }

    /// Whether a provider is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.provider.is_ok()
    }

    /// Sends `prompt` and returns the reply parsed as a JSON object.
    ///
    /// Exactly one request is made; failures are not retried.
    ///
    /// # Errors
    ///
    /// * [`AiError::Config`] if no provider is configured
    /// * [`AiError::Http`] / [`AiError::Provider`] / [`AiError::Json`] if
    ///   the request fails
    /// * [`AiError::MalformedResponse`] if the reply is not a JSON object
    pub async fn generate(&self, prompt: &str) -> Result<serde_json::Value, AiError> {
        let provider = self.provider.as_ref().map_err(|message| AiError::Config {
            message: message.clone(),
        })?;

        let content = provider.complete_json(prompt).await.inspect_err(|e| {
            log::error!("Narrative request failed: {e}");
        })?;

        let value: serde_json::Value = serde_json::from_str(content.trim()).map_err(|e| {
            log::error!("Narrative response is not valid JSON: {e}");
            AiError::MalformedResponse {
                message: e.to_string(),
            }
        })?;

        if !value.is_object() {
            return Err(AiError::MalformedResponse {
                message: "expected a JSON object".to_string(),
            });
        }

        Ok(value)
    }
}
