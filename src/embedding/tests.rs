use super::{Embedder, StubEmbedder};

#[test]
fn test_stub_is_deterministic() {
    let embedder = StubEmbedder::new(64).unwrap();
    assert_eq!(
        embedder.embed("pollo al horno").unwrap(),
        embedder.embed("pollo al horno").unwrap()
    );
}

#[test]
fn test_stub_distinguishes_texts() {
    let embedder = StubEmbedder::new(64).unwrap();
    assert_ne!(
        embedder.embed("pollo al horno").unwrap(),
        embedder.embed("torta con huevo").unwrap()
    );
}

#[test]
fn test_stub_output_is_unit_length() {
    let embedder = StubEmbedder::new(384).unwrap();
    let embedding = embedder.embed("comida para niños").unwrap();
    assert_eq!(embedding.len(), 384);

    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[test]
fn test_batch_matches_single_calls() {
    let embedder = StubEmbedder::new(32).unwrap();
    let batch = embedder.embed_batch(&["uno", "dos"]).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0], embedder.embed("uno").unwrap());
    assert_eq!(batch[1], embedder.embed("dos").unwrap());
}

#[test]
fn test_empty_batch() {
    let embedder = StubEmbedder::new(32).unwrap();
    assert!(embedder.embed_batch(&[]).unwrap().is_empty());
}

#[test]
fn test_zero_dimension_rejected() {
    assert!(StubEmbedder::new(0).is_err());
}
