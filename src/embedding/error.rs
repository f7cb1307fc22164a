use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by embedding backends.
pub enum EmbeddingError {
    /// Backend configuration is invalid.
    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },

    /// The backend failed to produce a vector.
    #[error("embedding inference failed: {reason}")]
    InferenceFailed {
        /// Error message from the backend.
        reason: String,
    },
}
