//! Anthropic Messages API client
//!
//! Implements the [`LanguageModel`] port over `POST /v1/messages`.
//! Transient failures (rate limits, server errors, overload) are retried
//! with exponential backoff; permanent failures surface immediately as
//! [`RagError::LanguageModel`].

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::warn;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::AnthropicConfig;
use crate::domain::ports::LanguageModel;

use super::retry::{is_transient_status, RetryPolicy};
use super::types::{Message, MessageRequest, MessageResponse};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// HTTP client for the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    retry: RetryPolicy,
}

/// One attempt's failure, classified for the retry loop.
enum AttemptError {
    Transient(String),
    Permanent(String),
}

impl AnthropicClient {
    /// Create a client from configuration.
    ///
    /// The API key comes from the configuration or, failing that, the
    /// `ANTHROPIC_API_KEY` environment variable.
    pub fn new(config: AnthropicConfig) -> RagResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                RagError::InvalidConfiguration(
                    "Anthropic API key not set. Set ANTHROPIC_API_KEY or configure anthropic.api_key."
                        .to_string(),
                )
            })?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RagError::LanguageModel(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url,
            model: config.model,
            max_tokens: config.max_tokens,
            retry: RetryPolicy::new(&config.retry),
        })
    }

    async fn send_request(&self, request: &MessageRequest) -> Result<MessageResponse, AttemptError> {
        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                // Timeouts and connection failures are worth one more try
                if e.is_timeout() || e.is_connect() {
                    AttemptError::Transient(format!("request failed: {e}"))
                } else {
                    AttemptError::Permanent(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            let message = format!("API returned {status}: {body}");
            return Err(if is_transient_status(status) {
                AttemptError::Transient(message)
            } else {
                AttemptError::Permanent(message)
            });
        }

        response
            .json()
            .await
            .map_err(|e| AttemptError::Permanent(format!("failed to parse response: {e}")))
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(&self, prompt: &str) -> RagResult<String> {
        let request = MessageRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens: self.max_tokens,
        };

        let mut attempt = 0u32;
        loop {
            match self.send_request(&request).await {
                Ok(response) => return Ok(response.text()),
                Err(AttemptError::Transient(message)) if attempt < self.retry.max_retries() => {
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        %message,
                        "transient language model failure, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(AttemptError::Transient(message) | AttemptError::Permanent(message)) => {
                    return Err(RagError::LanguageModel(message));
                }
            }
        }
    }
}
