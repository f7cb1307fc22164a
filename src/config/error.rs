use thiserror::Error;

#[derive(Debug, Error)]
/// Errors loading or validating configuration.
pub enum ConfigError {
    /// A numeric environment variable failed to parse.
    #[error("invalid value for {var}: '{value}' is not a valid number")]
    InvalidNumber {
        /// Environment variable name.
        var: String,
        /// Offending value.
        value: String,
    },

    /// A numeric setting must be positive.
    #[error("{var} must be greater than zero")]
    MustBePositive {
        /// Environment variable name.
        var: String,
    },

    /// Chunk overlap must be smaller than the chunk window.
    #[error("chunk overlap ({overlap}) must be smaller than the chunk window ({window})")]
    InvalidChunking {
        /// Configured window.
        window: usize,
        /// Configured overlap.
        overlap: usize,
    },
}
