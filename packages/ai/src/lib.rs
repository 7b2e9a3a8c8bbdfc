#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Narrative generation via an external LLM.
//!
//! Talks to any `OpenAI`-compatible chat completions API (Groq by default,
//! `OpenAI`, or a self-hosted server via `AI_BASE_URL`) in JSON mode. The
//! [`narrative::NarrativeClient`] turns every failure (missing credential,
//! transport error, bad status, non-JSON content) into an [`AiError`] so the
//! caller can report it as a structured value instead of failing the
//! request.

pub mod narrative;
pub mod providers;

pub use narrative::NarrativeClient;

use thiserror::Error;

/// Errors that can occur during narrative generation.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to the LLM provider failed (connect, timeout, body).
    #[error("An error occurred with the narrative service: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider's response envelope could not be decoded.
    #[error("Unexpected response from the narrative service: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error (non-2xx status, empty completion).
    #[error("An error occurred with the narrative service: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// The completion content is not a JSON object.
    #[error("The narrative service returned malformed JSON: {message}")]
    MalformedResponse {
        /// Description of what went wrong.
        message: String,
    },

    /// Configuration error (missing credential, unknown provider).
    #[error("{message}")]
    Config {
        /// Description.
        message: String,
    },
}
