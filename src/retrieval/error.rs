use thiserror::Error;

use crate::constants::{MAX_TOP_K, MIN_TOP_K};
use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
/// Errors returned by safe retrieval.
pub enum RetrievalError {
    /// Retriever configuration is invalid.
    #[error("invalid retrieval configuration: {reason}")]
    ConfigError {
        /// What was wrong.
        reason: String,
    },

    /// Requested result count is out of range.
    #[error("top_k must be between {MIN_TOP_K} and {MAX_TOP_K}, got {value}")]
    InvalidTopK {
        /// Requested value.
        value: usize,
    },

    /// Query embedding failed.
    #[error("embedding failed during retrieval: {reason}")]
    EmbeddingFailed {
        /// Error message from the embedder.
        reason: String,
    },

    /// Store query failed.
    #[error(transparent)]
    VectorDb(#[from] VectorDbError),
}
