//! Retrieval models: stored records, query results, and answers.

use serde::{Deserialize, Serialize};

/// Similarity metric used by a collection.
///
/// Only cosine similarity is supported; the enum keeps the metric a typed
/// value on the wire rather than a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    Cosine,
}

impl DistanceMetric {
    /// Wire name of the metric
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single record written to a collection: the chunk text together with
/// its embedding, deterministic id, and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Deterministic storage id (`chunk_<index>`)
    pub id: String,

    /// Embedding vector for the chunk text
    pub embedding: Vec<f32>,

    /// The chunk text itself
    pub text: String,

    /// Metadata carried with the record (at least `chunk_index` and `source`)
    pub metadata: serde_json::Value,
}

/// One retrieved chunk with its distance to the query vector.
///
/// Smaller distance means more similar; query results are ordered
/// closest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The stored chunk text
    pub text: String,

    /// Distance between the stored vector and the query vector
    pub distance: f32,
}

impl ScoredChunk {
    /// Create a new scored chunk
    pub fn new(text: impl Into<String>, distance: f32) -> Self {
        Self {
            text: text.into(),
            distance,
        }
    }
}

/// The outcome of one query: the verbatim model output plus the context
/// that was retrieved for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The question as asked
    pub question: String,

    /// The language model's generated text, unmodified
    pub answer: String,

    /// Retrieved context, closest first
    pub context: Vec<ScoredChunk>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_wire_name() {
        assert_eq!(DistanceMetric::Cosine.as_str(), "cosine");
        assert_eq!(DistanceMetric::Cosine.to_string(), "cosine");
    }

    #[test]
    fn test_answer_serializes_context() {
        let answer = Answer {
            question: "Who?".to_string(),
            answer: "Nobody.".to_string(),
            context: vec![ScoredChunk::new("chunk text", 0.25)],
        };

        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["question"], "Who?");
        assert_eq!(json["context"][0]["text"], "chunk text");
    }
}
