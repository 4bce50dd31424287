pub mod chunking;
pub mod config;
pub mod document;
pub mod retrieval;

pub use chunking::ChunkingConfig;
pub use config::{
    AnthropicConfig, ChromaConfig, Config, DocumentConfig, EmbeddingConfig, LogFormat,
    LoggingConfig, QueryConfig, RetryConfig,
};
pub use document::{Chunk, Document};
pub use retrieval::{Answer, ChunkRecord, DistanceMetric, ScoredChunk};
