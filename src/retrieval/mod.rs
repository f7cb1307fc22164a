//! Safety-constrained semantic retrieval.
//!
//! Combines vector similarity with a hard allergen exclusion filter. The
//! store-level `must_not` predicate is the first line of defense; every
//! returned candidate is then re-checked against the full exclusion
//! vocabulary over its text and metadata. The re-check is never skipped:
//! stored metadata may be stale or incomplete, and the cost of showing an
//! unsafe recipe vastly exceeds the cost of hiding a safe one. Ambiguity
//! resolves toward exclusion.

mod error;

#[cfg(test)]
mod tests;

pub use error::RetrievalError;

use std::collections::BTreeSet;

use tracing::{debug, info, instrument, warn};

use crate::allergen::{exclusion_vocabulary, screen_allergies};
use crate::constants::{DEFAULT_OVERFETCH_FACTOR, MAX_TOP_K, MIN_TOP_K};
use crate::embedding::Embedder;
use crate::vectordb::{AllergenExclusion, ScoredDocument, VectorDbClient};

/// Retrieval parameters.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub collection_name: String,
    /// Multiplier applied to `top_k` when querying the store, compensating
    /// for candidates the safety filter removes. No second round trip is
    /// made; a shortfall is returned as-is.
    pub overfetch_factor: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            collection_name: crate::constants::DEFAULT_COLLECTION_NAME.to_string(),
            overfetch_factor: DEFAULT_OVERFETCH_FACTOR,
        }
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> Result<(), RetrievalError> {
        if self.collection_name.is_empty() {
            return Err(RetrievalError::ConfigError {
                reason: "collection_name must not be empty".to_string(),
            });
        }
        if self.overfetch_factor == 0 {
            return Err(RetrievalError::ConfigError {
                reason: "overfetch_factor must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// One verified-safe result, in store similarity order.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeHit {
    pub text: String,
    pub score: f32,
    pub recipe_id: Option<String>,
}

/// Result of a safe search, including what could not be enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SafeSearchOutcome {
    /// Verified-safe hits, best first, at most `top_k`.
    pub hits: Vec<SafeHit>,
    /// Declared allergen terms that matched no canonical allergen. The
    /// filter could not act on these; callers must surface them, not mask
    /// them.
    pub unenforced_terms: Vec<String>,
}

impl SafeSearchOutcome {
    /// Hit texts in order, the bare contract shape.
    pub fn texts(&self) -> Vec<String> {
        self.hits.iter().map(|hit| hit.text.clone()).collect()
    }
}

/// Semantic retriever with a hard allergen exclusion guarantee.
///
/// Stateless per call; safe to share across concurrent requests.
pub struct SafeRecipeRetriever<E: Embedder, C: VectorDbClient> {
    embedder: E,
    store: C,
    config: RetrievalConfig,
}

impl<E: Embedder, C: VectorDbClient> SafeRecipeRetriever<E, C> {
    pub fn new(embedder: E, store: C, config: RetrievalConfig) -> Result<Self, RetrievalError> {
        config.validate()?;
        Ok(Self {
            embedder,
            store,
            config,
        })
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    /// Retrieves up to `top_k` safe document texts for a query.
    ///
    /// Guaranteed to contain no text or metadata match for any forbidden
    /// allergen. An empty result means no safe match exists, not a failure.
    pub async fn search_safe<S: AsRef<str>>(
        &self,
        query: &str,
        forbidden_allergens: &[S],
        top_k: usize,
    ) -> Result<Vec<String>, RetrievalError> {
        Ok(self
            .search_safe_detailed(query, forbidden_allergens, top_k)
            .await?
            .texts())
    }

    /// [`Self::search_safe`] plus scores, recipe ids, and the declared terms
    /// the filter could not enforce.
    #[instrument(skip(self, query, forbidden_allergens), fields(query_len = query.len(), top_k = top_k))]
    pub async fn search_safe_detailed<S: AsRef<str>>(
        &self,
        query: &str,
        forbidden_allergens: &[S],
        top_k: usize,
    ) -> Result<SafeSearchOutcome, RetrievalError> {
        if !(MIN_TOP_K..=MAX_TOP_K).contains(&top_k) {
            return Err(RetrievalError::InvalidTopK { value: top_k });
        }

        let screening = screen_allergies(forbidden_allergens.iter().map(|s| s.as_ref()));
        if !screening.unrecognized.is_empty() {
            warn!(
                unrecognized = ?screening.unrecognized,
                "Declared allergen terms matched no canonical allergen; they cannot be enforced"
            );
        }

        let vocabulary = exclusion_vocabulary(&screening.allergens, forbidden_allergens);
        let store_filter = store_filter(&screening.allergens);

        let query_vector =
            self.embedder
                .embed(query)
                .map_err(|e| RetrievalError::EmbeddingFailed {
                    reason: e.to_string(),
                })?;

        let fetch_limit = top_k as u64 * self.config.overfetch_factor;
        let candidates = self
            .store
            .search(
                &self.config.collection_name,
                query_vector,
                fetch_limit,
                store_filter.as_ref(),
            )
            .await?;

        let candidate_count = candidates.len();
        let mut hits = Vec::with_capacity(top_k);
        let mut rejected = 0usize;

        // Store order is similarity order; the filter only removes, never
        // re-ranks.
        for candidate in candidates {
            if hits.len() == top_k {
                break;
            }

            match verify_candidate(&candidate, &vocabulary) {
                Some(hit) => hits.push(hit),
                None => {
                    rejected += 1;
                    debug!(id = candidate.id, "Candidate rejected by safety filter");
                }
            }
        }

        if hits.len() < top_k {
            debug!(
                accepted = hits.len(),
                requested = top_k,
                "Fewer safe results than requested; returning partial result"
            );
        }

        info!(
            candidates = candidate_count,
            accepted = hits.len(),
            rejected = rejected,
            "Safe search complete"
        );

        Ok(SafeSearchOutcome {
            hits,
            unenforced_terms: screening.unrecognized,
        })
    }
}

fn store_filter(
    allergens: &BTreeSet<crate::allergen::Allergen>,
) -> Option<AllergenExclusion> {
    if allergens.is_empty() {
        return None;
    }
    Some(AllergenExclusion::new(
        allergens.iter().map(|a| a.code().to_string()),
    ))
}

/// Last line of defense: accepts a candidate only when its text and metadata
/// are present and free of every exclusion term. Malformed candidates are
/// rejected rather than crashing the batch.
fn verify_candidate(
    candidate: &ScoredDocument,
    vocabulary: &BTreeSet<String>,
) -> Option<SafeHit> {
    let text = candidate.text.as_ref()?;
    let contains = candidate.contains.as_ref()?;

    let lowered_text = text.to_lowercase();
    let lowered_contains = contains.join(",").to_lowercase();

    for term in vocabulary {
        if lowered_text.contains(term) || lowered_contains.contains(term) {
            return None;
        }
    }

    Some(SafeHit {
        text: text.clone(),
        score: candidate.score,
        recipe_id: candidate.recipe_id.clone(),
    })
}
