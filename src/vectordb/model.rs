use std::collections::HashMap;

use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{ListValue, ScoredPoint, Value};
use qdrant_client::qdrant::point_id::PointIdOptions;

/// One document ready for insertion: vector plus flattened payload fields.
///
/// Allergen fields are canonical codes; the ingestion pipeline is the only
/// producer, so raw text never lands in `contains`/`safe_for`.
#[derive(Debug, Clone)]
pub struct DocumentPoint {
    /// Numeric point id, derived from `doc_id` via [`generate_point_id`].
    pub id: u64,
    pub vector: Vec<f32>,
    /// Composite document id: `{recipe_id}_chunk_{index}`.
    pub doc_id: String,
    pub recipe_id: String,
    /// Chunk text, stored alongside the vector for retrieval.
    pub text: String,
    /// Canonical allergen codes present in the recipe.
    pub contains: Vec<String>,
    /// Canonical allergen codes the recipe is certified safe against.
    pub safe_for: Vec<String>,
    pub age_range: Option<String>,
}

/// One ranked search candidate with whatever payload the store returned.
///
/// Payload fields are optional on purpose: a candidate missing its text or
/// its `contains` metadata is malformed, and the retriever excludes it rather
/// than guessing.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub id: u64,
    pub score: f32,
    pub doc_id: Option<String>,
    pub recipe_id: Option<String>,
    pub text: Option<String>,
    /// `None` when the payload lacks the field entirely (incomplete
    /// metadata); `Some(vec![])` when the recipe declares no allergens.
    pub contains: Option<Vec<String>>,
    pub safe_for: Vec<String>,
    pub age_range: Option<String>,
}

impl ScoredDocument {
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n,
            _ => return None,
        };

        let payload = point.payload;

        Some(ScoredDocument {
            id,
            score: point.score,
            doc_id: payload_string(&payload, "doc_id"),
            recipe_id: payload_string(&payload, "recipe_id"),
            text: payload_string(&payload, "text"),
            contains: payload_string_list(&payload, "contains"),
            safe_for: payload_string_list(&payload, "safe_for").unwrap_or_default(),
            age_range: payload_string(&payload, "age_range"),
        })
    }
}

fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn payload_string_list(payload: &HashMap<String, Value>, key: &str) -> Option<Vec<String>> {
    match &payload.get(key)?.kind {
        Some(Kind::ListValue(list)) => Some(
            list.values
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
        ),
        _ => None,
    }
}

/// Builds a list-typed payload value from string items.
pub(crate) fn string_list_value(items: &[String]) -> Value {
    Value {
        kind: Some(Kind::ListValue(ListValue {
            values: items
                .iter()
                .map(|item| Value {
                    kind: Some(Kind::StringValue(item.clone())),
                })
                .collect(),
        })),
    }
}

/// Derives the numeric point id for a composite document id.
///
/// BLAKE3 truncated to 64 bits: stable across processes and releases, so
/// re-ingesting an unchanged recipe upserts the same points instead of
/// proliferating duplicates. Collisions at 64 bits are negligible for
/// realistic corpus sizes, and an upsert collision degrades to one recipe
/// chunk superseding another, never to an unsafe result surfacing.
pub fn generate_point_id(doc_id: &str) -> u64 {
    let hash = blake3::hash(doc_id.as_bytes());
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
