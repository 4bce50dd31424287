use serde::{Deserialize, Serialize};

use super::chunking::ChunkingConfig;

/// Main configuration structure for docask
///
/// Every externally supplied value lives here: vector-store connection,
/// model credentials and identifiers, collection name, chunking
/// parameters, and the document path. Loaded hierarchically (defaults,
/// then `docask.yaml`, then `DOCASK_*` environment variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Name of the vector-store collection
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Vector store (ChromaDB) connection configuration
    #[serde(default)]
    pub chroma: ChromaConfig,

    /// Embedding service configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Language model configuration
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Document chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Query configuration
    #[serde(default)]
    pub query: QueryConfig,

    /// Source document configuration
    #[serde(default)]
    pub document: DocumentConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_collection() -> String {
    "docask".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            chroma: ChromaConfig::default(),
            embedding: EmbeddingConfig::default(),
            anthropic: AnthropicConfig::default(),
            chunking: ChunkingConfig::default(),
            query: QueryConfig::default(),
            document: DocumentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// ChromaDB connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChromaConfig {
    /// Hostname of the ChromaDB server
    #[serde(default = "default_chroma_host")]
    pub host: String,

    /// Port of the ChromaDB server
    #[serde(default = "default_chroma_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_chroma_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_chroma_host() -> String {
    "localhost".to_string()
}

const fn default_chroma_port() -> u16 {
    8000
}

const fn default_chroma_timeout_secs() -> u64 {
    30
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            host: default_chroma_host(),
            port: default_chroma_port(),
            timeout_secs: default_chroma_timeout_secs(),
        }
    }
}

impl ChromaConfig {
    /// Base URL of the ChromaDB HTTP API
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Embedding service configuration (OpenAI-compatible API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// API key. Falls back to `OPENAI_API_KEY` env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the API
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    /// Embedding model identifier
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Expected embedding dimension for the configured model
    ///
    /// Stored vectors and query vectors must share this dimensionality;
    /// a response with a different dimension is a contract violation.
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,

    /// Request timeout in seconds
    #[serde(default = "default_embedding_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum texts per single API request
    #[serde(default = "default_embedding_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_embedding_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

const fn default_embedding_dimension() -> usize {
    1536
}

const fn default_embedding_timeout_secs() -> u64 {
    30
}

const fn default_embedding_max_batch_size() -> usize {
    2048
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            dimension: default_embedding_dimension(),
            timeout_secs: default_embedding_timeout_secs(),
            max_batch_size: default_embedding_max_batch_size(),
        }
    }
}

/// Language model configuration (Anthropic Messages API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnthropicConfig {
    /// API key. Falls back to `ANTHROPIC_API_KEY` env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the API
    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// Maximum tokens to generate per answer
    #[serde(default = "default_anthropic_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_anthropic_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry policy for transient API failures
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

const fn default_anthropic_max_tokens() -> u32 {
    1024
}

const fn default_anthropic_timeout_secs() -> u64 {
    120
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_anthropic_base_url(),
            model: default_anthropic_model(),
            max_tokens: default_anthropic_max_tokens(),
            timeout_secs: default_anthropic_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry policy configuration for the language model client
///
/// Retries live in the collaborator client only; the orchestrator never
/// retries on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff duration in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    1_000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QueryConfig {
    /// Number of chunks retrieved as context per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

const fn default_top_k() -> usize {
    3
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

/// Source document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DocumentConfig {
    /// Path to the plain-text document to ingest
    #[serde(default = "default_document_path")]
    pub path: String,

    /// Logical source identifier stored in chunk metadata
    /// (defaults to the file name of `path`)
    #[serde(default)]
    pub source: Option<String>,
}

fn default_document_path() -> String {
    "document.txt".to_string()
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
            source: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}
