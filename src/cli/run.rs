//! Command execution: wires configuration into adapters and drives the
//! RAG pipeline for one invocation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::models::{Config, DistanceMetric, Document};
use crate::domain::ports::{EmbeddingClient, LanguageModel, VectorStore};
use crate::infrastructure::anthropic::AnthropicClient;
use crate::infrastructure::chroma::ChromaClient;
use crate::infrastructure::embeddings::OpenAiEmbeddingClient;
use crate::infrastructure::text::Chunker;
use crate::services::RagService;

use super::types::Cli;

/// Question used after `--reset` when none was supplied.
const DEFAULT_TEST_QUESTION: &str = "What is this document about?";

/// Execute one CLI invocation end to end.
pub async fn execute(cli: Cli, config: Config) -> Result<()> {
    let document = load_document(&cli, &config).await?;

    let chunker = Chunker::new(config.chunking.clone())?;
    let embedder: Arc<dyn EmbeddingClient> =
        Arc::new(OpenAiEmbeddingClient::new(config.embedding.clone())?);
    let model: Arc<dyn LanguageModel> = Arc::new(AnthropicClient::new(config.anthropic.clone())?);
    let store = ChromaClient::new(&config.chroma)?;
    let service = RagService::new(embedder, model, chunker);

    let top_k = cli.top_k.unwrap_or(config.query.top_k);
    let question = if cli.question.is_empty() {
        DEFAULT_TEST_QUESTION.to_string()
    } else {
        cli.question.join(" ")
    };

    let collection = if cli.reset {
        service
            .reset(&store, &config.collection, DistanceMetric::Cosine, &document)
            .await
            .context("Failed to reset collection")?
    } else {
        let collection = store
            .get_or_create(&config.collection, DistanceMetric::Cosine)
            .await
            .context("Failed to open collection")?;
        service
            .ingest(&document, collection.as_ref())
            .await
            .context("Failed to ingest document")?;
        collection
    };

    let answer = service
        .answer(&question, collection.as_ref(), top_k)
        .await
        .context("Failed to answer question")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        println!("{}", answer.answer);
    }

    Ok(())
}

/// Read the configured (or overridden) document from disk.
async fn load_document(cli: &Cli, config: &Config) -> Result<Document> {
    let path = cli
        .document
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.document.path));

    let text = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read document from {}", path.display()))?;

    let source = config.document.source.clone().unwrap_or_else(|| {
        path.file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
    });

    Ok(Document::new(source, text))
}
