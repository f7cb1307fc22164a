//! Central defaults shared across modules.
//!
//! Runtime overrides live in [`crate::config::Config`]; these are the values
//! used when nothing else is configured.

/// Default embedding dimension (all-MiniLM-class sentence encoders).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Default Qdrant collection holding recipe documents.
pub const DEFAULT_COLLECTION_NAME: &str = "recetas";

/// Default Qdrant endpoint.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default recipe dataset location.
pub const DEFAULT_DATASET_PATH: &str = "./data/recetas.json";

/// Default chunk window, in words.
pub const DEFAULT_CHUNK_WORDS: usize = 200;

/// Default overlap between consecutive chunks, in words.
pub const DEFAULT_CHUNK_OVERLAP: usize = 40;

/// Default number of safe results returned by a search.
pub const DEFAULT_TOP_K: usize = 5;

/// Smallest accepted `top_k`.
pub const MIN_TOP_K: usize = 1;

/// Largest accepted `top_k`.
pub const MAX_TOP_K: usize = 10;

/// Multiplier applied to `top_k` when querying the store, to compensate for
/// candidates removed by the safety filter.
pub const DEFAULT_OVERFETCH_FACTOR: u64 = 2;
