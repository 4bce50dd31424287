//! End-to-end pipeline tests over deterministic in-memory fakes.
//!
//! Every collaborator port is faked: a bag-of-words embedder (cosine
//! similarity works on word overlap), an in-memory vector store, and a
//! language model that echoes its prompt so assembled prompts can be
//! inspected.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use docask::domain::models::{
    ChunkRecord, ChunkingConfig, DistanceMetric, Document, ScoredChunk,
};
use docask::domain::ports::{CollectionHandle, EmbeddingClient, LanguageModel, VectorStore};
use docask::{Chunker, RagError, RagResult, RagService};

const DIM: usize = 32;

fn embed_text(text: &str) -> Vec<f32> {
    let mut vector = vec![0f32; DIM];
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let mut hasher = DefaultHasher::new();
        word.to_lowercase().hash(&mut hasher);
        vector[(hasher.finish() % DIM as u64) as usize] += 1.0;
    }
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}

struct BagOfWordsEmbedder;

#[async_trait]
impl EmbeddingClient for BagOfWordsEmbedder {
    fn name(&self) -> &'static str {
        "bag-of-words"
    }

    fn dimension(&self) -> usize {
        DIM
    }

    fn max_batch_size(&self) -> usize {
        1024
    }

    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        Ok(embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| embed_text(t)).collect())
    }
}

struct EchoModel;

#[async_trait]
impl LanguageModel for EchoModel {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn generate(&self, prompt: &str) -> RagResult<String> {
        Ok(prompt.to_string())
    }
}

type Records = Arc<Mutex<Vec<ChunkRecord>>>;

#[derive(Default)]
struct InMemoryStore {
    collections: Mutex<HashMap<String, Records>>,
}

struct InMemoryCollection {
    name: String,
    records: Records,
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn get_or_create(
        &self,
        name: &str,
        _metric: DistanceMetric,
    ) -> RagResult<Box<dyn CollectionHandle>> {
        let records = self
            .collections
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default()
            .clone();

        Ok(Box::new(InMemoryCollection {
            name: name.to_string(),
            records,
        }))
    }

    async fn delete(&self, name: &str) -> RagResult<()> {
        match self.collections.lock().unwrap().remove(name) {
            Some(_) => Ok(()),
            None => Err(RagError::CollectionNotFound(name.to_string())),
        }
    }
}

#[async_trait]
impl CollectionHandle for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn count(&self) -> RagResult<usize> {
        Ok(self.records.lock().unwrap().len())
    }

    async fn add(&self, records: &[ChunkRecord]) -> RagResult<()> {
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> RagResult<Vec<ScoredChunk>> {
        let records = self.records.lock().unwrap();

        let mut scored: Vec<ScoredChunk> = records
            .iter()
            .map(|record| {
                let dot: f32 = record
                    .embedding
                    .iter()
                    .zip(embedding)
                    .map(|(a, b)| a * b)
                    .sum();
                ScoredChunk::new(record.text.clone(), 1.0 - dot)
            })
            .collect();

        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(top_k);
        Ok(scored)
    }
}

fn service(max_chars: usize, overlap: usize) -> RagService {
    RagService::new(
        Arc::new(BagOfWordsEmbedder),
        Arc::new(EchoModel),
        Chunker::new(ChunkingConfig::new(max_chars, overlap)).unwrap(),
    )
}

#[tokio::test]
async fn test_end_to_end_retrieval_and_prompt_assembly() {
    let store = InMemoryStore::default();
    let svc = service(20, 5);
    let document = Document::new(
        "doc.txt",
        "Paragraph one.\n\nParagraph two about Kerry Walsh.",
    );

    let collection = store
        .get_or_create("docs", DistanceMetric::Cosine)
        .await
        .unwrap();

    let written = svc.ingest(&document, collection.as_ref()).await.unwrap();
    assert!(written >= 2, "expected 2+ chunks, got {written}");
    assert_eq!(collection.count().await.unwrap(), written);

    let answer = svc
        .answer("Who is Kerry Walsh?", collection.as_ref(), 3)
        .await
        .unwrap();

    // The chunk naming Kerry Walsh is the closest match
    assert!(answer.context[0].text.contains("Kerry Walsh"));
    // and appears verbatim in the assembled prompt (the echo model
    // returns the prompt unchanged)
    assert!(answer.answer.contains(&answer.context[0].text));
    assert!(answer.answer.contains("Question: Who is Kerry Walsh?"));
}

#[tokio::test]
async fn test_ingestion_is_idempotent() {
    let store = InMemoryStore::default();
    let svc = service(20, 5);
    let document = Document::new("doc.txt", "Some text long enough to produce chunks here.");

    let collection = store
        .get_or_create("docs", DistanceMetric::Cosine)
        .await
        .unwrap();

    let first = svc.ingest(&document, collection.as_ref()).await.unwrap();
    assert!(first > 0);

    let second = svc.ingest(&document, collection.as_ref()).await.unwrap();
    assert_eq!(second, 0);
    assert_eq!(collection.count().await.unwrap(), first);
}

#[tokio::test]
async fn test_stored_ids_preserve_chunk_order() {
    let store = InMemoryStore::default();
    let svc = service(20, 5);
    let text = "Alpha section here.\n\nBravo section there.\n\nCharlie section beyond.";
    let document = Document::new("doc.txt", text);

    let collection = store
        .get_or_create("docs", DistanceMetric::Cosine)
        .await
        .unwrap();
    svc.ingest(&document, collection.as_ref()).await.unwrap();

    let expected = Chunker::new(ChunkingConfig::new(20, 5))
        .unwrap()
        .split(text);

    let records = store.collections.lock().unwrap()["docs"].clone();
    let records = records.lock().unwrap();

    assert_eq!(records.len(), expected.len());
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.id, format!("chunk_{i}"));
        assert_eq!(record.text, expected[i]);
        assert_eq!(record.metadata["chunk_index"], i);
        assert_eq!(record.metadata["source"], "doc.txt");
    }
}

#[tokio::test]
async fn test_empty_collection_query_is_not_an_error() {
    let store = InMemoryStore::default();
    let svc = service(20, 5);

    let collection = store
        .get_or_create("docs", DistanceMetric::Cosine)
        .await
        .unwrap();

    let answer = svc
        .answer("Anything in here?", collection.as_ref(), 5)
        .await
        .unwrap();

    assert!(answer.context.is_empty());
    // prompt assembly still happened, with an empty context block
    assert!(answer.answer.contains("Question: Anything in here?"));
}

#[tokio::test]
async fn test_empty_document_ingests_nothing() {
    let store = InMemoryStore::default();
    let svc = service(20, 5);
    let document = Document::new("empty.txt", "");

    let collection = store
        .get_or_create("docs", DistanceMetric::Cosine)
        .await
        .unwrap();

    let written = svc.ingest(&document, collection.as_ref()).await.unwrap();
    assert_eq!(written, 0);
    assert_eq!(collection.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_reset_replaces_old_content_entirely() {
    let store = InMemoryStore::default();
    let svc = service(20, 5);

    let first = Document::new(
        "first.txt",
        "Original content spanning several chunks of material.\n\nMore original content.",
    );
    let collection = store
        .get_or_create("docs", DistanceMetric::Cosine)
        .await
        .unwrap();
    let first_count = svc.ingest(&first, collection.as_ref()).await.unwrap();
    assert!(first_count > 0);

    let second = Document::new("second.txt", "Replacement text.");
    let collection = svc
        .reset(&store, "docs", DistanceMetric::Cosine, &second)
        .await
        .unwrap();

    let expected = Chunker::new(ChunkingConfig::new(20, 5))
        .unwrap()
        .split(&second.text)
        .len();

    // only the new document's chunks, never old plus new
    assert_eq!(collection.count().await.unwrap(), expected);
}

#[tokio::test]
async fn test_reset_tolerates_missing_collection() {
    let store = InMemoryStore::default();
    let svc = service(20, 5);
    let document = Document::new("doc.txt", "Fresh content for a fresh collection.");

    // no collection named "docs" exists yet; delete inside reset is a
    // tolerated no-op
    let collection = svc
        .reset(&store, "docs", DistanceMetric::Cosine, &document)
        .await
        .unwrap();

    assert!(collection.count().await.unwrap() > 0);
}
