//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `RECETARIO_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_WORDS, DEFAULT_COLLECTION_NAME, DEFAULT_DATASET_PATH,
    DEFAULT_EMBEDDING_DIM, DEFAULT_OVERFETCH_FACTOR, DEFAULT_QDRANT_URL,
};

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RECETARIO_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Collection holding recipe documents. Default: `recetas`.
    pub collection: String,

    /// Embedding vector dimension. Default: `384`.
    pub embedding_dim: usize,

    /// Recipe dataset path used by the ingestion command.
    /// Default: `./data/recetas.json`.
    pub dataset_path: PathBuf,

    /// Chunk window, in words. Default: `200`.
    pub chunk_words: usize,

    /// Chunk overlap, in words. Default: `40`.
    pub chunk_overlap: usize,

    /// Over-fetch multiplier applied to `top_k` at query time. Default: `2`.
    pub overfetch_factor: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION_NAME.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            chunk_words: DEFAULT_CHUNK_WORDS,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            overfetch_factor: DEFAULT_OVERFETCH_FACTOR,
        }
    }
}

impl Config {
    const ENV_QDRANT_URL: &'static str = "RECETARIO_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "RECETARIO_COLLECTION";
    const ENV_EMBEDDING_DIM: &'static str = "RECETARIO_EMBEDDING_DIM";
    const ENV_DATASET_PATH: &'static str = "RECETARIO_DATASET_PATH";
    const ENV_CHUNK_WORDS: &'static str = "RECETARIO_CHUNK_WORDS";
    const ENV_CHUNK_OVERLAP: &'static str = "RECETARIO_CHUNK_OVERLAP";
    const ENV_OVERFETCH_FACTOR: &'static str = "RECETARIO_OVERFETCH_FACTOR";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            qdrant_url: Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url),
            collection: Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection),
            embedding_dim: Self::parse_usize_from_env(
                Self::ENV_EMBEDDING_DIM,
                defaults.embedding_dim,
            )?,
            dataset_path: Self::parse_path_from_env(Self::ENV_DATASET_PATH, defaults.dataset_path),
            chunk_words: Self::parse_usize_from_env(Self::ENV_CHUNK_WORDS, defaults.chunk_words)?,
            chunk_overlap: Self::parse_usize_from_env(
                Self::ENV_CHUNK_OVERLAP,
                defaults.chunk_overlap,
            )?,
            overfetch_factor: Self::parse_u64_from_env(
                Self::ENV_OVERFETCH_FACTOR,
                defaults.overfetch_factor,
            )?,
        })
    }

    /// Validates numeric invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_dim == 0 {
            return Err(ConfigError::MustBePositive {
                var: Self::ENV_EMBEDDING_DIM.to_string(),
            });
        }

        if self.chunk_words == 0 {
            return Err(ConfigError::MustBePositive {
                var: Self::ENV_CHUNK_WORDS.to_string(),
            });
        }

        if self.chunk_overlap >= self.chunk_words {
            return Err(ConfigError::InvalidChunking {
                window: self.chunk_words,
                overlap: self.chunk_overlap,
            });
        }

        if self.overfetch_factor == 0 {
            return Err(ConfigError::MustBePositive {
                var: Self::ENV_OVERFETCH_FACTOR.to_string(),
            });
        }

        Ok(())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: var_name.to_string(),
                value,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                var: var_name.to_string(),
                value,
            }),
            Err(_) => Ok(default),
        }
    }
}
