//! ChromaDB HTTP client
//!
//! Implements the [`VectorStore`] and [`CollectionHandle`] ports over
//! the ChromaDB REST API. The server owns persistence and similarity
//! search; this adapter only shapes requests, classifies status codes,
//! and keeps the get-or-create race a typed, locally recovered outcome.

use async_trait::async_trait;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{ChromaConfig, ChunkRecord, DistanceMetric, ScoredChunk};
use crate::domain::ports::{CollectionHandle, VectorStore};

use super::types::{
    AddRequest, CollectionInfo, CreateCollectionRequest, CreateOutcome, QueryRequest,
    QueryResponse,
};

/// Client for a ChromaDB server.
pub struct ChromaClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChromaClient {
    /// Create a client from connection configuration.
    pub fn new(config: &ChromaConfig) -> RagResult<Self> {
        if config.host.is_empty() {
            return Err(RagError::InvalidConfiguration(
                "chroma.host cannot be empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RagError::VectorStore(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
        })
    }

    /// Create a client against an explicit base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> RagResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| RagError::VectorStore(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch a collection by name; `None` when the server has no such
    /// collection.
    pub async fn get_collection(&self, name: &str) -> RagResult<Option<CollectionInfo>> {
        let url = format!("{}/api/v1/collections/{name}", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RagError::VectorStore(format!("request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(status_error("get collection", response).await);
        }

        let info: CollectionInfo = response
            .json()
            .await
            .map_err(|e| RagError::VectorStore(format!("failed to parse response: {e}")))?;

        Ok(Some(info))
    }

    /// Create a collection. HTTP 409 maps to the typed
    /// [`CreateOutcome::AlreadyExists`]; everything else non-success is
    /// an error.
    pub async fn create_collection(
        &self,
        name: &str,
        metric: DistanceMetric,
    ) -> RagResult<CreateOutcome> {
        let url = format!("{}/api/v1/collections", self.base_url);

        let body = CreateCollectionRequest {
            name: name.to_string(),
            metadata: serde_json::json!({ "hnsw:space": metric.as_str() }),
            get_or_create: false,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RagError::VectorStore(format!("request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::CONFLICT {
            return Ok(CreateOutcome::AlreadyExists);
        }

        if !response.status().is_success() {
            return Err(status_error("create collection", response).await);
        }

        let info: CollectionInfo = response
            .json()
            .await
            .map_err(|e| RagError::VectorStore(format!("failed to parse response: {e}")))?;

        Ok(CreateOutcome::Created(info))
    }

    fn handle(&self, info: CollectionInfo) -> Box<dyn CollectionHandle> {
        Box::new(ChromaCollection {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            id: info.id,
            name: info.name,
        })
    }
}

#[async_trait]
impl VectorStore for ChromaClient {
    async fn get_or_create(
        &self,
        name: &str,
        metric: DistanceMetric,
    ) -> RagResult<Box<dyn CollectionHandle>> {
        if let Some(info) = self.get_collection(name).await? {
            tracing::debug!(collection = name, "reusing existing collection");
            return Ok(self.handle(info));
        }

        match self.create_collection(name, metric).await? {
            CreateOutcome::Created(info) => {
                tracing::info!(collection = name, metric = %metric, "created collection");
                Ok(self.handle(info))
            }
            CreateOutcome::AlreadyExists => {
                // A concurrent creator won the race; fall back to fetch.
                tracing::debug!(collection = name, "lost create race, fetching winner");
                let info = self.get_collection(name).await?.ok_or_else(|| {
                    RagError::VectorStore(format!(
                        "collection '{name}' reported as existing but could not be fetched"
                    ))
                })?;
                Ok(self.handle(info))
            }
        }
    }

    async fn delete(&self, name: &str) -> RagResult<()> {
        let url = format!("{}/api/v1/collections/{name}", self.base_url);

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| RagError::VectorStore(format!("request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RagError::CollectionNotFound(name.to_string()));
        }

        if !response.status().is_success() {
            return Err(status_error("delete collection", response).await);
        }

        Ok(())
    }
}

/// Handle bound to one collection id.
pub struct ChromaCollection {
    http: reqwest::Client,
    base_url: String,
    id: String,
    name: String,
}

#[async_trait]
impl CollectionHandle for ChromaCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn count(&self) -> RagResult<usize> {
        let url = format!("{}/api/v1/collections/{}/count", self.base_url, self.id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RagError::VectorStore(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(status_error("count", response).await);
        }

        response
            .json::<usize>()
            .await
            .map_err(|e| RagError::VectorStore(format!("failed to parse count: {e}")))
    }

    async fn add(&self, records: &[ChunkRecord]) -> RagResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let url = format!("{}/api/v1/collections/{}/add", self.base_url, self.id);

        // Decompose typed records into the API's parallel arrays
        let body = AddRequest {
            ids: records.iter().map(|r| r.id.clone()).collect(),
            embeddings: records.iter().map(|r| r.embedding.clone()).collect(),
            documents: records.iter().map(|r| r.text.clone()).collect(),
            metadatas: records.iter().map(|r| r.metadata.clone()).collect(),
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RagError::VectorStore(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(status_error("add", response).await);
        }

        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> RagResult<Vec<ScoredChunk>> {
        let url = format!("{}/api/v1/collections/{}/query", self.base_url, self.id);

        let body = QueryRequest {
            query_embeddings: vec![embedding.to_vec()],
            n_results: top_k,
            include: vec!["documents", "distances"],
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RagError::VectorStore(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(status_error("query", response).await);
        }

        let result: QueryResponse = response
            .json()
            .await
            .map_err(|e| RagError::VectorStore(format!("failed to parse response: {e}")))?;

        // One query embedding in, one result list out
        let documents = result.documents.into_iter().next().unwrap_or_default();
        let distances = result.distances.into_iter().next().unwrap_or_default();

        Ok(documents
            .into_iter()
            .zip(distances)
            .map(|(text, distance)| ScoredChunk::new(text, distance))
            .collect())
    }
}

async fn status_error(operation: &str, response: reqwest::Response) -> RagError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read response body".to_string());
    RagError::VectorStore(format!("{operation} returned {status}: {body}"))
}
