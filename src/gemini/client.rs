//! Core `GenerativeBackend` trait and `GeminiClient` implementation.
//!
//! `GeminiClient` calls the Gemini REST `generateContent` endpoint. All
//! connection details come from [`ProviderConfig`]; nothing is hardcoded
//! beyond the wire contract itself.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ProviderConfig;
use crate::gemini::types::{GenerateContentRequest, GenerateContentResponse};

// ---------------------------------------------------------------------------
// ProviderError
// ---------------------------------------------------------------------------

/// Errors that can occur during a provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API credential could be resolved at construction time.
    #[error("no API key configured (set `provider.api_key` or {})", ProviderConfig::API_KEY_ENV)]
    MissingApiKey,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("provider request timed out")]
    Timeout,

    /// The provider answered with a non-success HTTP status.
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// The provider returned a response with no usable content.
    #[error("provider returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// GenerativeBackend trait
// ---------------------------------------------------------------------------

/// Async trait for provider backends.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn GenerativeBackend>`).
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Issue exactly one `generateContent` call against `model`.
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError>;
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// REST client for the Gemini `generateContent` endpoint.
///
/// # No hardcoded connection details
/// `base_url`, credential and timeout come exclusively from the
/// [`ProviderConfig`] passed to [`GeminiClient::from_config`].
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a `GeminiClient` from provider config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`. A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingApiKey`] when neither the config nor
    /// the environment provides a credential. This is checked here, before
    /// any operation is attempted, so a misconfigured process fails at
    /// startup rather than on first use.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .resolve_api_key()
            .ok_or(ProviderError::MissingApiKey)?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    /// POST the request to `{base_url}/models/{model}:generateContent`.
    ///
    /// Failures are surfaced unchanged — no retry, no backoff.
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
