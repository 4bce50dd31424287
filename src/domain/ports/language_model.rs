//! Language model port.

use async_trait::async_trait;

use crate::domain::errors::RagResult;

/// Trait for hosted language models.
///
/// Given a fully assembled prompt, returns generated text. Retry policy,
/// if any, belongs to the implementation; callers see a single
/// success-or-failure outcome.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model client name (e.g., "anthropic")
    fn name(&self) -> &'static str;

    /// Generate text for the given prompt
    async fn generate(&self, prompt: &str) -> RagResult<String>;
}
