use thiserror::Error;

use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
/// Errors returned by the ingestion pipeline.
pub enum IngestError {
    /// Pipeline configuration is invalid.
    #[error("invalid ingestion configuration: {reason}")]
    ConfigError {
        /// What was wrong.
        reason: String,
    },

    /// Batch embedding failed.
    #[error("embedding failed during ingestion: {reason}")]
    EmbeddingFailed {
        /// Error message from the embedder.
        reason: String,
    },

    /// Store operation failed.
    #[error(transparent)]
    VectorDb(#[from] VectorDbError),
}
