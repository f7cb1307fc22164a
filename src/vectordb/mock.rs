use crate::vectordb::{
    AllergenExclusion, DocumentPoint, ScoredDocument, VectorDbClient, VectorDbError,
    WriteConsistency,
};
use std::collections::HashMap;

/// In-memory store with cosine-similarity search and `must_not` filter
/// semantics matching the Qdrant adapter.
#[derive(Default)]
pub struct MockVectorDbClient {
    collections: std::sync::RwLock<HashMap<String, MockCollection>>,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: HashMap<u64, MockStoredDocument>,
}

#[derive(Clone)]
struct MockStoredDocument {
    vector: Vec<f32>,
    doc_id: Option<String>,
    recipe_id: Option<String>,
    text: Option<String>,
    contains: Option<Vec<String>>,
    safe_for: Vec<String>,
    age_range: Option<String>,
}

impl MockVectorDbClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.points.len())
    }

    /// Inserts a raw point with arbitrary (possibly missing) payload fields,
    /// for exercising malformed-candidate handling.
    pub fn insert_raw(
        &self,
        collection: &str,
        id: u64,
        vector: Vec<f32>,
        text: Option<String>,
        contains: Option<Vec<String>>,
    ) -> Result<(), VectorDbError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::UpsertFailed {
                    collection: collection.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        coll.points.insert(
            id,
            MockStoredDocument {
                vector,
                doc_id: None,
                recipe_id: None,
                text,
                contains,
                safe_for: Vec::new(),
                age_range: None,
            },
        );

        Ok(())
    }
}

impl VectorDbClient for MockVectorDbClient {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::CreateCollectionFailed {
                    collection: name.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        collections
            .entry(name.to_string())
            .or_insert(MockCollection {
                vector_size,
                points: HashMap::new(),
            });

        Ok(())
    }

    async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<DocumentPoint>,
        _consistency: WriteConsistency,
    ) -> Result<(), VectorDbError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::UpsertFailed {
                    collection: collection.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        for point in points {
            if point.vector.len() as u64 != coll.vector_size {
                return Err(VectorDbError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: point.vector.len(),
                });
            }

            coll.points.insert(
                point.id,
                MockStoredDocument {
                    vector: point.vector,
                    doc_id: Some(point.doc_id),
                    recipe_id: Some(point.recipe_id),
                    text: Some(point.text),
                    contains: Some(point.contains),
                    safe_for: point.safe_for,
                    age_range: point.age_range,
                },
            );
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
        exclusion: Option<&AllergenExclusion>,
    ) -> Result<Vec<ScoredDocument>, VectorDbError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll =
            collections
                .get(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        let mut results: Vec<ScoredDocument> = coll
            .points
            .iter()
            .filter(|(_, p)| match (exclusion, &p.contains) {
                // must_not semantics: a condition only matches a populated
                // field, so points without `contains` pass the store filter.
                // The client-side re-check is what catches those.
                (Some(filter), Some(contains)) => !filter.excludes(contains),
                _ => true,
            })
            .map(|(&id, p)| {
                let score = cosine_similarity(&query, &p.vector);
                ScoredDocument {
                    id,
                    score,
                    doc_id: p.doc_id.clone(),
                    recipe_id: p.recipe_id.clone(),
                    text: p.text.clone(),
                    contains: p.contains.clone(),
                    safe_for: p.safe_for.clone(),
                    age_range: p.age_range.clone(),
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(limit as usize);
        Ok(results)
    }

    async fn delete_points(&self, collection: &str, ids: Vec<u64>) -> Result<(), VectorDbError> {
        let mut collections =
            self.collections
                .write()
                .map_err(|_| VectorDbError::DeleteFailed {
                    collection: collection.to_string(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        for id in ids {
            coll.points.remove(&id);
        }

        Ok(())
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
