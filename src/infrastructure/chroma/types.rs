//! Request and response types for the ChromaDB HTTP API (v1).

use serde::{Deserialize, Serialize};

/// A collection as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionInfo {
    /// Server-assigned collection id, used in record-level endpoints
    pub id: String,

    /// Collection name
    pub name: String,
}

/// Body for `POST /api/v1/collections`.
#[derive(Debug, Serialize)]
pub struct CreateCollectionRequest {
    pub name: String,

    /// Collection metadata; carries the similarity metric as
    /// `{"hnsw:space": "cosine"}`
    pub metadata: serde_json::Value,

    /// Always false: the get-or-create race is resolved client-side so
    /// the conflict outcome stays a typed result
    pub get_or_create: bool,
}

/// Body for `POST /api/v1/collections/{id}/add`.
///
/// Parallel arrays; index `i` of each array describes one record.
#[derive(Debug, Serialize)]
pub struct AddRequest {
    pub ids: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    pub documents: Vec<String>,
    pub metadatas: Vec<serde_json::Value>,
}

/// Body for `POST /api/v1/collections/{id}/query`.
#[derive(Debug, Serialize)]
pub struct QueryRequest {
    pub query_embeddings: Vec<Vec<f32>>,
    pub n_results: usize,
    pub include: Vec<&'static str>,
}

/// Response for a query: one inner list per query embedding, ordered
/// closest first.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub ids: Vec<Vec<String>>,
    pub documents: Vec<Vec<String>>,
    pub distances: Vec<Vec<f32>>,
}

/// Typed outcome of a create call.
///
/// `AlreadyExists` is the create/create race signal (HTTP 409); callers
/// recover by fetching the existing collection rather than failing.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(CollectionInfo),
    AlreadyExists,
}
