//! Docask - retrieval-augmented question answering over a single document
//!
//! Docask reads a plain-text document, splits it into overlapping chunks,
//! stores chunk embeddings in an external vector database (ChromaDB), and
//! answers questions by retrieving the most similar chunks and forwarding
//! them as context to a hosted language model.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, port traits, and error types
//! - **Service Layer** (`services`): pipeline orchestration
//! - **Infrastructure Layer** (`infrastructure`): external adapters and
//!   the chunker
//! - **CLI Layer** (`cli`): command-line interface
//!
//! All collaborators sit behind async port traits and are injected into
//! the orchestrator, so tests substitute deterministic fakes for the
//! embedding client, the vector store, and the language model.

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{RagError, RagResult};
pub use domain::models::{
    Answer, Chunk, ChunkRecord, ChunkingConfig, Config, DistanceMetric, Document, ScoredChunk,
};
pub use domain::ports::{CollectionHandle, EmbeddingClient, LanguageModel, VectorStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::text::Chunker;
pub use services::RagService;
