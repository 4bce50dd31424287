//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces implemented by infrastructure adapters:
//! - [`EmbeddingClient`]: text-to-vector generation
//! - [`VectorStore`] / [`CollectionHandle`]: persistence and similarity search
//! - [`LanguageModel`]: answer generation
//!
//! The orchestrator depends only on these traits; concrete clients are
//! injected at construction so tests can substitute deterministic fakes.

pub mod embedding;
pub mod language_model;
pub mod vector_store;

pub use embedding::EmbeddingClient;
pub use language_model::LanguageModel;
pub use vector_store::{CollectionHandle, VectorStore};
