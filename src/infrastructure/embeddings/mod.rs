//! Embedding service adapters

pub mod openai;

pub use openai::OpenAiEmbeddingClient;
