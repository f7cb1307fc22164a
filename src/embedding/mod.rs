//! Embedding generation seam.
//!
//! The system treats embedding computation as an opaque collaborator: text in,
//! fixed-length vector out, deterministic for a fixed model. [`StubEmbedder`]
//! is the in-tree deterministic backend; hosts plug real sentence encoders in
//! through [`Embedder`].

mod error;
mod stub;

#[cfg(test)]
mod tests;

pub use error::EmbeddingError;
pub use stub::StubEmbedder;

/// Text-to-vector contract consumed by ingestion and retrieval.
///
/// Both calls are synchronous and blocking from the caller's perspective;
/// retry and timeout policy belong to the implementing backend.
pub trait Embedder: Send + Sync {
    /// Output vector length. Every returned vector has exactly this length.
    fn embedding_dim(&self) -> usize;

    /// Embeds a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds a batch, one vector per input in input order.
    ///
    /// The default maps [`Embedder::embed`] over the batch; backends with a
    /// native batch path should override it (one round trip per batch).
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

impl<T: Embedder> Embedder for &T {
    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }
}

impl<T: Embedder> Embedder for std::sync::Arc<T> {
    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }
}
