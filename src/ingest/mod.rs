//! Recipe ingestion pipeline.
//!
//! Drives the document builder over a recipe batch, embeds every chunk in one
//! batch call, and upserts (vector, payload) points into the store. The
//! pipeline owns its collaborators explicitly; there is no ambient client or
//! model state.

mod error;


pub use error::IngestError;

use tracing::{info, instrument, warn};

use crate::constants::{DEFAULT_COLLECTION_NAME, DEFAULT_EMBEDDING_DIM};
use crate::document::{DocumentBuilder, RecipeDocument};
use crate::embedding::Embedder;
use crate::recipe::Recipe;
use crate::vectordb::{DocumentPoint, VectorDbClient, WriteConsistency, generate_point_id};

/// Ingestion parameters.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub collection_name: String,
    pub vector_size: u64,
    pub write_consistency: WriteConsistency,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            vector_size: DEFAULT_EMBEDDING_DIM as u64,
            write_consistency: WriteConsistency::Strong,
        }
    }
}

impl IngestConfig {
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.collection_name.is_empty() {
            return Err(IngestError::ConfigError {
                reason: "collection_name must not be empty".to_string(),
            });
        }
        if self.vector_size == 0 {
            return Err(IngestError::ConfigError {
                reason: "vector_size must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// What a batch ingestion actually did.
///
/// `documents_stored` is the headline count; the rest is the per-record
/// reporting batch callers need (skips are warnings, not batch failures).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Documents upserted into the store.
    pub documents_stored: usize,
    /// Recipes dropped for missing ids.
    pub recipes_skipped: usize,
    /// Recipe ids whose `safe_for` and `contains` sets intersect. Flagged
    /// and excluded: a recipe cannot be certified safe against an allergen
    /// it contains.
    pub conflicting: Vec<String>,
}

/// Batch loader from recipes into the vector store.
pub struct IngestionPipeline<E: Embedder, C: VectorDbClient> {
    embedder: E,
    store: C,
    builder: DocumentBuilder,
    config: IngestConfig,
}

impl<E: Embedder, C: VectorDbClient> IngestionPipeline<E, C> {
    pub fn new(
        embedder: E,
        store: C,
        builder: DocumentBuilder,
        config: IngestConfig,
    ) -> Result<Self, IngestError> {
        config.validate()?;
        Ok(Self {
            embedder,
            store,
            builder,
            config,
        })
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    /// Ensures the target collection exists.
    pub async fn ensure_collection(&self) -> Result<(), IngestError> {
        self.store
            .ensure_collection(&self.config.collection_name, self.config.vector_size)
            .await?;
        Ok(())
    }

    /// Ingests a recipe batch.
    ///
    /// Invalid records (missing id, conflicting allergen labels) are skipped
    /// with a warning; the batch continues. All chunk texts are embedded in
    /// one batch call. Point ids derive from the composite document ids, so
    /// re-ingesting unchanged recipes upserts in place.
    #[instrument(skip(self, recipes), fields(recipes = recipes.len()))]
    pub async fn ingest(&self, recipes: &[Recipe]) -> Result<IngestSummary, IngestError> {
        let mut summary = IngestSummary::default();
        let mut documents: Vec<RecipeDocument> = Vec::new();

        for recipe in recipes {
            if recipe.id.trim().is_empty() {
                warn!(title = %recipe.title, "Skipping recipe without id");
                summary.recipes_skipped += 1;
                continue;
            }

            let conflicts = recipe.conflicting_allergens();
            if !conflicts.is_empty() {
                warn!(
                    recipe_id = %recipe.id,
                    conflicts = ?conflicts,
                    "Skipping recipe claiming safe_for and contains for the same allergen"
                );
                summary.conflicting.push(recipe.id.clone());
                continue;
            }

            documents.extend(self.builder.build(recipe));
        }

        if documents.is_empty() {
            info!(
                skipped = summary.recipes_skipped,
                conflicting = summary.conflicting.len(),
                "Nothing to ingest"
            );
            return Ok(summary);
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let vectors =
            self.embedder
                .embed_batch(&texts)
                .map_err(|e| IngestError::EmbeddingFailed {
                    reason: e.to_string(),
                })?;

        let points: Vec<DocumentPoint> = documents
            .into_iter()
            .zip(vectors)
            .map(|(doc, vector)| DocumentPoint {
                id: generate_point_id(&doc.doc_id),
                vector,
                doc_id: doc.doc_id,
                recipe_id: doc.metadata.recipe_id.clone(),
                text: doc.text,
                contains: doc.metadata.contains_codes(),
                safe_for: doc.metadata.safe_for_codes(),
                age_range: doc.metadata.age_range.clone(),
            })
            .collect();

        summary.documents_stored = points.len();

        self.store
            .upsert_points(
                &self.config.collection_name,
                points,
                self.config.write_consistency,
            )
            .await?;

        info!(
            stored = summary.documents_stored,
            skipped = summary.recipes_skipped,
            conflicting = summary.conflicting.len(),
            "Ingestion complete"
        );

        Ok(summary)
    }
}
