//! Domain errors for the docask pipeline.

use thiserror::Error;

/// Domain-level errors that can occur in the docask system.
///
/// Collaborator failures carry the collaborator's own message; the core
/// performs no retries and no partial-result recovery, so every variant
/// except `CollectionNotFound` is fatal for the call that raised it.
#[derive(Debug, Error)]
pub enum RagError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("Language model error: {0}")]
    LanguageModel(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
}

pub type RagResult<T> = Result<T, RagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RagError::InvalidConfiguration("overlap must be less than max_chars".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: overlap must be less than max_chars"
        );

        let err = RagError::CollectionNotFound("docs".to_string());
        assert_eq!(err.to_string(), "Collection not found: docs");
    }
}
