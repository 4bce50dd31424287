//! OpenAI embedding client adapter.
//!
//! Talks to the OpenAI `/v1/embeddings` endpoint. Compatible with any
//! OpenAI-compatible embedding API (e.g., Azure OpenAI, local servers).
//!
//! The response order is restored from the per-item `index` field, and
//! both the result length and every vector's dimension are checked
//! against the request: a mismatch would silently corrupt the
//! chunk-to-vector mapping downstream, so it is reported as a contract
//! violation instead.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::EmbeddingConfig;
use crate::domain::ports::EmbeddingClient;

/// OpenAI embedding client.
pub struct OpenAiEmbeddingClient {
    config: EmbeddingConfig,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiEmbeddingClient {
    /// Create a client from configuration.
    ///
    /// The API key comes from the configuration or, failing that, the
    /// `OPENAI_API_KEY` environment variable.
    pub fn new(config: EmbeddingConfig) -> RagResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                RagError::InvalidConfiguration(
                    "OpenAI API key not set. Set OPENAI_API_KEY or configure embedding.api_key."
                        .to_string(),
                )
            })?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                RagError::EmbeddingService(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    async fn call_embeddings_api(&self, texts: Vec<String>) -> RagResult<Vec<Vec<f32>>> {
        let requested = texts.len();
        let url = format!("{}/embeddings", self.config.base_url);

        let request_body = EmbeddingsRequest {
            model: self.config.model.clone(),
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RagError::EmbeddingService(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(RagError::EmbeddingService(format!(
                "API returned {status}: {body}"
            )));
        }

        let result: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| RagError::EmbeddingService(format!("failed to parse response: {e}")))?;

        // Restore input order from the index field
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        if data.len() != requested {
            return Err(RagError::EmbeddingService(format!(
                "expected {requested} embeddings, got {}",
                data.len()
            )));
        }

        for item in &data {
            if item.embedding.len() != self.config.dimension {
                return Err(RagError::EmbeddingService(format!(
                    "embedding at index {} has dimension {}, expected {}",
                    item.index,
                    item.embedding.len(),
                    self.config.dimension
                )));
            }
        }

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingClient for OpenAiEmbeddingClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn max_batch_size(&self) -> usize {
        self.config.max_batch_size
    }

    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        let results = self.call_embeddings_api(vec![text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| RagError::EmbeddingService("empty embedding response".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_vectors = Vec::with_capacity(texts.len());

        // Re-chunk by max_batch_size; each batch preserves input order
        for batch_start in (0..texts.len()).step_by(self.config.max_batch_size) {
            let batch_end = (batch_start + self.config.max_batch_size).min(texts.len());
            let batch = texts[batch_start..batch_end].to_vec();

            let vectors = self.call_embeddings_api(batch).await?;
            all_vectors.extend(vectors);
        }

        Ok(all_vectors)
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
