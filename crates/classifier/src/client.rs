//! Chat completion client for the suggestion service.
//!
//! Sends the classification prompt to an OpenAI-compatible
//! `/chat/completions` endpoint and parses the JSON object the model returns.

use async_trait::async_trait;
use serde::Deserialize;
use ticketdesk_core::classification::{build_prompt, Suggestion};

use crate::config::ClassifierConfig;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from a single suggestion request.
#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    /// No API key was configured.
    #[error("Classification service API key is not configured")]
    NotConfigured,

    /// The request did not complete within the configured timeout.
    #[error("Classification service timed out after {0} ms")]
    Timeout(u128),

    /// The underlying HTTP request failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Classification service error ({status}): {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response contained no message content.
    #[error("Classification service returned an empty response")]
    EmptyResponse,

    /// The response or the model output was not the expected JSON.
    #[error("Invalid JSON from classification service: {0}")]
    InvalidJson(String),
}

// ---------------------------------------------------------------------------
// SuggestionService
// ---------------------------------------------------------------------------

/// Something that can suggest a category and priority for a description.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn suggest(&self, description: &str) -> Result<Suggestion, SuggestionError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Extract and parse the suggestion from a raw chat completion body.
fn parse_completion(body: &str) -> Result<Suggestion, SuggestionError> {
    let completion: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| SuggestionError::InvalidJson(format!("completion body: {e}")))?;

    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(SuggestionError::EmptyResponse)?;

    Suggestion::from_model_output(&content)
        .map_err(|e| SuggestionError::InvalidJson(format!("model output: {e}")))
}

// ---------------------------------------------------------------------------
// ChatCompletionClient
// ---------------------------------------------------------------------------

/// HTTP client for an OpenAI-compatible chat completion endpoint.
pub struct ChatCompletionClient {
    client: reqwest::Client,
    config: ClassifierConfig,
}

impl ChatCompletionClient {
    /// Create a client whose requests are bounded by `config.timeout`.
    pub fn new(config: ClassifierConfig) -> Result<Self, SuggestionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn map_send_error(&self, err: reqwest::Error) -> SuggestionError {
        if err.is_timeout() {
            SuggestionError::Timeout(self.config.timeout.as_millis())
        } else {
            SuggestionError::Request(err)
        }
    }
}

#[async_trait]
impl SuggestionService for ChatCompletionClient {
    async fn suggest(&self, description: &str) -> Result<Suggestion, SuggestionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SuggestionError::NotConfigured)?;

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "user", "content": build_prompt(description)},
            ],
            "response_format": {"type": "json_object"},
        });

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(SuggestionError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_completion(&text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
