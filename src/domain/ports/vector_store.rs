//! Vector store ports.
//!
//! The store itself exposes collection lifecycle (get-or-create, delete);
//! a collection handle exposes exactly `count`, `add`, and `query` — the
//! narrow seam the orchestrator depends on, implemented by an adapter
//! over the actual store client and by in-memory fakes in tests.

use async_trait::async_trait;

use crate::domain::errors::RagResult;
use crate::domain::models::{ChunkRecord, DistanceMetric, ScoredChunk};

/// A handle to one named collection of embedded chunks.
#[async_trait]
pub trait CollectionHandle: Send + Sync {
    /// Name of the collection this handle points at
    fn name(&self) -> &str;

    /// Number of records currently stored
    async fn count(&self) -> RagResult<usize>;

    /// Write a batch of records in one call, atomically or not at all
    async fn add(&self, records: &[ChunkRecord]) -> RagResult<()>;

    /// Return the `top_k` records nearest to `embedding`, closest first
    async fn query(&self, embedding: &[f32], top_k: usize) -> RagResult<Vec<ScoredChunk>>;
}

/// Collection lifecycle operations on the vector store.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Fetch the named collection, creating it with the given metric if
    /// absent. A create/create race with a concurrent caller is resolved
    /// by falling back to the winner's collection, never by failing.
    async fn get_or_create(
        &self,
        name: &str,
        metric: DistanceMetric,
    ) -> RagResult<Box<dyn CollectionHandle>>;

    /// Delete the named collection.
    ///
    /// Returns [`RagError::CollectionNotFound`] when absent; callers
    /// resetting a collection treat that as a tolerated no-op.
    ///
    /// [`RagError::CollectionNotFound`]: crate::domain::errors::RagError::CollectionNotFound
    async fn delete(&self, name: &str) -> RagResult<()>;
}
