//! Recetario library crate (used by the CLI binary and integration tests).
//!
//! Semantic recipe retrieval with a hard safety constraint: no recipe
//! containing a user's declared allergen is ever returned. A false negative
//! (an unsafe recipe surfacing) is a safety incident, not a quality defect,
//! so the allergen filter is applied twice — as a store-level predicate and
//! as a client-side re-check over every returned candidate.
//!
//! # Module map
//!
//! - [`allergen`] — canonical allergen vocabulary and normalization
//! - [`recipe`] — recipe data model and dataset loading
//! - [`document`] — canonical text assembly and chunking
//! - [`embedding`] — embedder trait seam plus a deterministic stub backend
//! - [`vectordb`] — Qdrant adapter, exclusion filter, in-memory mock
//! - [`ingest`] — batch ingestion pipeline
//! - [`retrieval`] — the safety-constrained retriever
//! - [`config`] — environment-backed runtime configuration
//!
//! Mock implementations are available behind `#[cfg(any(test, feature =
//! "mock"))]`.

pub mod allergen;
pub mod config;
pub mod constants;
pub mod document;
pub mod embedding;
pub mod ingest;
pub mod recipe;
pub mod retrieval;
pub mod vectordb;

pub use allergen::{
    Allergen, AllergyScreening, detect_allergens_from_text, exclusion_vocabulary,
    normalize_allergies, screen_allergies,
};
pub use config::{Config, ConfigError};
pub use document::{
    ChunkingConfig, ChunkingError, DocumentBuilder, DocumentMetadata, RecipeDocument,
    canonical_text, chunk_text,
};
pub use embedding::{Embedder, EmbeddingError, StubEmbedder};
pub use ingest::{IngestConfig, IngestError, IngestSummary, IngestionPipeline};
pub use recipe::{DatasetError, Ingredient, IngredientEntry, Recipe, load_recipes};
pub use retrieval::{
    RetrievalConfig, RetrievalError, SafeHit, SafeRecipeRetriever, SafeSearchOutcome,
};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::{MockVectorDbClient, cosine_similarity};
pub use vectordb::{
    AllergenExclusion, DEFAULT_COLLECTION_NAME, DEFAULT_VECTOR_SIZE, DocumentPoint, QdrantClient,
    ScoredDocument, VectorDbClient, VectorDbError, WriteConsistency, generate_point_id,
};
