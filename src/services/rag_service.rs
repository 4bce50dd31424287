//! RAG (Retrieval-Augmented Generation) service
//!
//! The only component with real orchestration logic: sequences chunking,
//! embedding, storage, retrieval, and prompt construction. Ingestion is
//! idempotent per collection (count-gated skip), so the whole pipeline
//! can be re-run safely; re-ingesting updated content requires an
//! explicit reset.

use std::sync::Arc;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{
    Answer, Chunk, ChunkRecord, DistanceMetric, Document, ScoredChunk,
};
use crate::domain::ports::{CollectionHandle, EmbeddingClient, LanguageModel, VectorStore};
use crate::infrastructure::text::Chunker;

/// RAG orchestrator over injected collaborator clients.
pub struct RagService {
    embedder: Arc<dyn EmbeddingClient>,
    model: Arc<dyn LanguageModel>,
    chunker: Chunker,
}

impl RagService {
    /// Create a new service
    pub fn new(
        embedder: Arc<dyn EmbeddingClient>,
        model: Arc<dyn LanguageModel>,
        chunker: Chunker,
    ) -> Self {
        Self {
            embedder,
            model,
            chunker,
        }
    }

    /// Ingest a document into a collection.
    ///
    /// Runs at most once per collection: when the collection already
    /// holds records, the call is a no-op and returns 0. Otherwise the
    /// document is chunked, embedded in one order-preserving batch call,
    /// and written in one batched add. Any failure aborts the whole
    /// ingestion; the caller can detect the incomplete state through
    /// `count()` and retry after fixing the cause.
    pub async fn ingest(
        &self,
        document: &Document,
        collection: &dyn CollectionHandle,
    ) -> RagResult<usize> {
        let existing = collection.count().await?;
        if existing > 0 {
            tracing::info!(
                collection = collection.name(),
                records = existing,
                "collection already populated, skipping ingestion"
            );
            return Ok(0);
        }

        let pieces = self.chunker.split(&document.text);
        if pieces.is_empty() {
            tracing::info!(source = %document.source, "document is empty, nothing to ingest");
            return Ok(0);
        }

        let chunks: Vec<Chunk> = pieces
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk::new(document.source.clone(), index, text))
            .collect();

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        // The embedding at index i must correspond to the chunk at
        // index i; a collaborator that breaks this breaks retrieval
        // silently, so a length mismatch is treated as a hard failure.
        if embeddings.len() != chunks.len() {
            return Err(RagError::EmbeddingService(format!(
                "expected {} embeddings for {} chunks, got {}",
                chunks.len(),
                chunks.len(),
                embeddings.len()
            )));
        }

        let records: Vec<ChunkRecord> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| ChunkRecord {
                id: chunk.storage_id(),
                embedding,
                text: chunk.text.clone(),
                metadata: chunk.metadata(),
            })
            .collect();

        collection.add(&records).await?;

        tracing::info!(
            collection = collection.name(),
            source = %document.source,
            chunks = records.len(),
            "ingested document"
        );

        Ok(records.len())
    }

    /// Answer a question from the collection's content.
    ///
    /// Embeds the question, retrieves the `top_k` nearest chunks
    /// (an empty collection yields empty context, not an error), and
    /// forwards the assembled prompt to the language model. The model's
    /// output is returned verbatim.
    pub async fn answer(
        &self,
        question: &str,
        collection: &dyn CollectionHandle,
        top_k: usize,
    ) -> RagResult<Answer> {
        if top_k == 0 {
            return Err(RagError::InvalidArgument(
                "top_k must be at least 1".to_string(),
            ));
        }

        let query_vector = self.embedder.embed(question).await?;

        let context = if collection.count().await? == 0 {
            Vec::new()
        } else {
            collection.query(&query_vector, top_k).await?
        };

        tracing::debug!(
            collection = collection.name(),
            retrieved = context.len(),
            "retrieved context for question"
        );

        let prompt = build_prompt(question, &context);
        let generated = self.model.generate(&prompt).await?;

        Ok(Answer {
            question: question.to_string(),
            answer: generated,
            context,
        })
    }

    /// Delete and repopulate a collection from a document.
    ///
    /// A missing collection during delete is tolerated (logged, not
    /// fatal); any other failure propagates.
    pub async fn reset(
        &self,
        store: &dyn VectorStore,
        name: &str,
        metric: DistanceMetric,
        document: &Document,
    ) -> RagResult<Box<dyn CollectionHandle>> {
        match store.delete(name).await {
            Ok(()) => tracing::info!(collection = name, "deleted collection for reset"),
            Err(RagError::CollectionNotFound(_)) => {
                tracing::warn!(collection = name, "collection absent during reset, nothing to delete");
            }
            Err(err) => return Err(err),
        }

        let collection = store.get_or_create(name, metric).await?;
        self.ingest(document, collection.as_ref()).await?;

        Ok(collection)
    }
}

/// Assemble the fixed prompt: domain framing, retrieved context (closest
/// first, blank-line separated), the literal question, and the
/// answer-from-context instruction.
pub fn build_prompt(question: &str, context: &[ScoredChunk]) -> String {
    let context_block = context
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a helpful assistant answering questions about a document.\n\
         Use only the context below to answer. If the context does not contain\n\
         the information needed, say so explicitly instead of guessing.\n\n\
         Context:\n{context_block}\n\n\
         Question: {question}"
    )
}
