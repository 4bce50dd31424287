//! Document and chunk domain models
//!
//! A document is the unit of ingestion; chunks are the unit of storage
//! and retrieval. Chunk identity is (source, index), and storage ids are
//! deterministic so repeated ingestion of the same document always maps
//! to the same records.

use serde::{Deserialize, Serialize};

/// A raw text document with a logical source identifier.
///
/// Immutable once loaded; the source identifier travels with every chunk
/// so retrieved context can be traced back to its origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Logical source identifier (e.g., a file name)
    pub source: String,

    /// The full document text
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Returns true if the document contains no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A contiguous substring of a document, positioned by split order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Source identifier of the owning document
    pub source: String,

    /// Index of this chunk within the split sequence (0-based)
    pub index: usize,

    /// The text content of this chunk
    pub text: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(source: impl Into<String>, index: usize, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            index,
            text: text.into(),
        }
    }

    /// Deterministic storage id for this chunk
    pub fn storage_id(&self) -> String {
        format!("chunk_{}", self.index)
    }

    /// Metadata stored alongside the chunk in the collection
    pub fn metadata(&self) -> serde_json::Value {
        serde_json::json!({
            "chunk_index": self.index,
            "source": self.source,
        })
    }
}
