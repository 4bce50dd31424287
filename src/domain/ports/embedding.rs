//! Embedding client port.
//!
//! Converts text into dense vectors for similarity search. All vectors
//! produced by one client share the same dimensionality; batch calls are
//! order-preserving — the vector at index `i` embeds the text at index
//! `i`, and an implementation that cannot guarantee this must fail
//! rather than return reordered results.

use async_trait::async_trait;

use crate::domain::errors::RagResult;

/// Trait for embedding clients (single-text and batched).
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Client name (e.g., "openai")
    fn name(&self) -> &'static str;

    /// Embedding dimension for this client's model
    fn dimension(&self) -> usize;

    /// Maximum number of texts per single API call
    fn max_batch_size(&self) -> usize;

    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> RagResult<Vec<f32>>;

    /// Generate embeddings for multiple texts, preserving input order.
    ///
    /// The result has exactly one vector per input text. Implementations
    /// re-chunk internally when the input exceeds [`max_batch_size`].
    ///
    /// [`max_batch_size`]: EmbeddingClient::max_batch_size
    async fn embed_batch(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>>;
}
