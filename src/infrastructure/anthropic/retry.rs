//! Retry policy with exponential backoff for the Anthropic client.
//!
//! Backoff doubles per attempt and is capped at the configured maximum.
//! Retries are confined to this client; the orchestrator propagates
//! failures without retrying.

use std::time::Duration;

use crate::domain::models::RetryConfig;

/// Retry policy with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
}

impl RetryPolicy {
    /// Build a policy from configuration
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff_ms: config.initial_backoff_ms,
            max_backoff_ms: config.max_backoff_ms,
        }
    }

    /// Maximum number of retries before giving up
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Backoff duration before retry number `attempt` (0-based):
    /// `initial * 2^attempt`, capped at the maximum.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let delay_ms = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(delay_ms)
    }
}

/// Whether an HTTP status is worth retrying.
///
/// Transient: 429 (rate limit), 500/502/503/504, and 529 (overloaded).
/// Client errors such as 400/401/403/404 are permanent.
pub fn is_transient_status(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504 | 529)
}
