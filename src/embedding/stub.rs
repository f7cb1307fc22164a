use tracing::debug;

use super::Embedder;
use super::error::EmbeddingError;

/// Deterministic embedder requiring no model files.
///
/// Hashes the input text into a seed, expands it with a linear congruential
/// generator, and L2-normalizes the result. The same text always maps to the
/// same unit vector, across processes and releases, so re-ingestion stays
/// idempotent. Real sentence encoders plug in through the [`Embedder`] trait;
/// this backend carries tests, examples, and hosts that have not wired a
/// model yet.
#[derive(Debug, Clone)]
pub struct StubEmbedder {
    dim: usize,
}

impl StubEmbedder {
    pub fn new(dim: usize) -> Result<Self, EmbeddingError> {
        if dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding dimension must be at least 1".to_string(),
            });
        }
        Ok(Self { dim })
    }
}

impl Embedder for StubEmbedder {
    fn embedding_dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let seed_bytes = blake3::hash(text.as_bytes());
        let seed = u64::from_le_bytes(
            seed_bytes.as_bytes()[0..8]
                .try_into()
                .map_err(|_| EmbeddingError::InferenceFailed {
                    reason: "seed derivation produced fewer than 8 bytes".to_string(),
                })?,
        );

        let mut embedding = Vec::with_capacity(self.dim);
        let mut state = seed;
        for _ in 0..self.dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }

        Ok(embedding)
    }
}
