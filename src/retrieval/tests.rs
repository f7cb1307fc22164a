use std::collections::BTreeSet;

use super::{RetrievalConfig, RetrievalError, SafeRecipeRetriever};
use crate::allergen::{Allergen, normalize_allergies};
use crate::document::{ChunkingConfig, DocumentBuilder};
use crate::embedding::{Embedder, StubEmbedder};
use crate::ingest::{IngestConfig, IngestionPipeline};
use crate::recipe::{IngredientEntry, Recipe};
use crate::vectordb::{MockVectorDbClient, VectorDbClient};

const DIM: usize = 16;
const COLLECTION: &str = "test_recetas";

fn recipe(id: &str, title: &str, ingredients: &[&str], contains: &[Allergen]) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        ingredients: ingredients
            .iter()
            .map(|i| IngredientEntry::Plain(i.to_string()))
            .collect(),
        steps: vec!["Hornear 40 minutos".to_string()],
        safe_for: BTreeSet::new(),
        contains: contains.iter().copied().collect(),
        age_range: None,
        tags: vec![],
    }
}

async fn seed(store: &MockVectorDbClient, recipes: &[Recipe]) {
    let pipeline = IngestionPipeline::new(
        StubEmbedder::new(DIM).unwrap(),
        store,
        DocumentBuilder::new(ChunkingConfig::default()).unwrap(),
        IngestConfig {
            collection_name: COLLECTION.to_string(),
            vector_size: DIM as u64,
            ..Default::default()
        },
    )
    .unwrap();

    pipeline.ensure_collection().await.unwrap();
    pipeline.ingest(recipes).await.unwrap();
}

fn retriever(
    store: &MockVectorDbClient,
) -> SafeRecipeRetriever<StubEmbedder, &MockVectorDbClient> {
    SafeRecipeRetriever::new(
        StubEmbedder::new(DIM).unwrap(),
        store,
        RetrievalConfig {
            collection_name: COLLECTION.to_string(),
            ..Default::default()
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_forbidden_allergen_never_returned() {
    let store = MockVectorDbClient::new();
    seed(
        &store,
        &[
            recipe("pollo_horno", "Pollo al horno", &["pollo", "sal"], &[]),
            recipe(
                "torta_huevo",
                "Torta con huevo",
                &["harina", "egg"],
                &[Allergen::Huevo],
            ),
        ],
    )
    .await;

    let results = retriever(&store)
        .search_safe("comida para niños", &["egg"], 5)
        .await
        .unwrap();

    assert!(!results.is_empty());
    let joined = results.join(" ").to_lowercase();
    assert!(joined.contains("pollo al horno"));
    assert!(!joined.contains("huevo"));
    assert!(!joined.contains("egg"));
}

#[tokio::test]
async fn test_filter_catches_text_even_when_metadata_is_clean() {
    let store = MockVectorDbClient::new();
    // Recipe text mentions egg but the record declares no allergens, so the
    // store-level filter cannot catch it; the text re-check must.
    seed(
        &store,
        &[recipe(
            "bizcocho",
            "Bizcocho",
            &["harina", "egg", "azúcar"],
            &[],
        )],
    )
    .await;

    // Detection at ingestion already derives HUEVO from the text; bypass it
    // by inserting a raw point whose metadata claims to be clean.
    store
        .insert_raw(
            COLLECTION,
            999,
            StubEmbedder::new(DIM).unwrap().embed("torta").unwrap(),
            Some("Torta con huevo escondido".to_string()),
            Some(vec![]),
        )
        .unwrap();

    let results = retriever(&store)
        .search_safe("torta", &["egg"], 5)
        .await
        .unwrap();

    for text in &results {
        let lowered = text.to_lowercase();
        assert!(!lowered.contains("huevo"));
        assert!(!lowered.contains("egg"));
    }
}

#[tokio::test]
async fn test_synonym_closure_is_enforced() {
    let store = MockVectorDbClient::new();
    store
        .ensure_collection(COLLECTION, DIM as u64)
        .await
        .unwrap();
    // Declared "milk"; the document says "leche". Only the synonym closure
    // catches the mismatch.
    store
        .insert_raw(
            COLLECTION,
            1,
            StubEmbedder::new(DIM).unwrap().embed("postre").unwrap(),
            Some("Postre de leche condensada".to_string()),
            Some(vec![]),
        )
        .unwrap();

    let results = retriever(&store)
        .search_safe("postre", &["milk"], 5)
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_respects_top_k_and_similarity_order() {
    let store = MockVectorDbClient::new();
    let recipes: Vec<Recipe> = (0..8)
        .map(|i| {
            recipe(
                &format!("receta_{}", i),
                &format!("Receta número {}", i),
                &["agua", "sal"],
                &[],
            )
        })
        .collect();
    seed(&store, &recipes).await;

    let outcome = retriever(&store)
        .search_safe_detailed("receta", &[] as &[&str], 3)
        .await
        .unwrap();

    assert_eq!(outcome.hits.len(), 3);
    for pair in outcome.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn test_partial_result_when_filter_starves_candidates() {
    let store = MockVectorDbClient::new();
    seed(
        &store,
        &[
            recipe("pollo", "Pollo al horno", &["pollo"], &[]),
            recipe(
                "torta",
                "Torta con huevo",
                &["egg"],
                &[Allergen::Huevo],
            ),
            recipe(
                "flan",
                "Flan de huevo",
                &["egg", "leche"],
                &[Allergen::Huevo, Allergen::Aplv],
            ),
        ],
    )
    .await;

    let results = retriever(&store)
        .search_safe("comida", &["egg", "milk"], 5)
        .await
        .unwrap();

    // Shortfall is returned as-is, not padded and not an error.
    assert_eq!(results.len(), 1);
    assert!(results[0].contains("Pollo al horno"));
}

#[tokio::test]
async fn test_empty_store_yields_empty_result() {
    let store = MockVectorDbClient::new();
    seed(&store, &[]).await;

    let results = retriever(&store)
        .search_safe("cualquier cosa", &["egg"], 5)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_unrecognized_terms_are_reported_not_fatal() {
    let store = MockVectorDbClient::new();
    seed(
        &store,
        &[recipe("pollo", "Pollo al horno", &["pollo"], &[])],
    )
    .await;

    let outcome = retriever(&store)
        .search_safe_detailed("pollo", &["kriptonita"], 5)
        .await
        .unwrap();

    assert_eq!(outcome.unenforced_terms, vec!["kriptonita".to_string()]);
    assert!(!outcome.hits.is_empty());
}

#[tokio::test]
async fn test_malformed_candidates_are_excluded() {
    let store = MockVectorDbClient::new();
    seed(
        &store,
        &[recipe("pollo", "Pollo al horno", &["pollo"], &[])],
    )
    .await;

    let embedder = StubEmbedder::new(DIM).unwrap();
    // Missing text.
    store
        .insert_raw(COLLECTION, 100, embedder.embed("a").unwrap(), None, Some(vec![]))
        .unwrap();
    // Missing contains metadata.
    store
        .insert_raw(
            COLLECTION,
            101,
            embedder.embed("b").unwrap(),
            Some("Receta sin metadatos".to_string()),
            None,
        )
        .unwrap();

    let results = retriever(&store)
        .search_safe("receta", &[] as &[&str], 10)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].contains("Pollo al horno"));
}

#[tokio::test]
async fn test_top_k_bounds() {
    let store = MockVectorDbClient::new();
    seed(&store, &[]).await;
    let retriever = retriever(&store);

    let err = retriever
        .search_safe("x", &[] as &[&str], 0)
        .await
        .unwrap_err();
    assert!(matches!(err, RetrievalError::InvalidTopK { value: 0 }));

    let err = retriever
        .search_safe("x", &[] as &[&str], 11)
        .await
        .unwrap_err();
    assert!(matches!(err, RetrievalError::InvalidTopK { value: 11 }));
}

#[tokio::test]
async fn test_config_validation() {
    let bad = RetrievalConfig {
        overfetch_factor: 0,
        ..Default::default()
    };
    assert!(bad.validate().is_err());

    let empty = RetrievalConfig {
        collection_name: String::new(),
        ..Default::default()
    };
    assert!(empty.validate().is_err());
}

// Seeded generator in place of a property-testing crate: random recipes and
// forbidden sets, one safety assertion.
#[tokio::test]
async fn test_safety_invariant_under_randomized_corpora() {
    const ALLERGEN_WORDS: &[(&str, Allergen)] = &[
        ("huevo", Allergen::Huevo),
        ("egg", Allergen::Huevo),
        ("leche", Allergen::Aplv),
        ("milk", Allergen::Aplv),
        ("soya", Allergen::Soya),
        ("nueces", Allergen::FrutosSecos),
    ];
    const SAFE_WORDS: &[&str] = &["pollo", "arroz", "zanahoria", "sal", "agua", "manzana"];
    const FORBIDDEN_POOLS: &[&[&str]] = &[
        &["egg"],
        &["milk"],
        &["egg", "leche"],
        &["soya", "tree nuts"],
        &["HUEVO", "APLV"],
    ];

    let mut state: u64 = 0x5EED;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    for round in 0..10 {
        let store = MockVectorDbClient::new();
        let mut recipes = Vec::new();

        for i in 0..12 {
            let mut ingredients: Vec<&str> =
                vec![SAFE_WORDS[next() % SAFE_WORDS.len()], SAFE_WORDS[next() % SAFE_WORDS.len()]];
            let mut contains = Vec::new();

            if next() % 2 == 0 {
                let (word, allergen) = ALLERGEN_WORDS[next() % ALLERGEN_WORDS.len()];
                ingredients.push(word);
                contains.push(allergen);
            }

            recipes.push(recipe(
                &format!("r{}_{}", round, i),
                &format!("Receta {}", i),
                &ingredients,
                &contains,
            ));
        }

        seed(&store, &recipes).await;

        let forbidden = FORBIDDEN_POOLS[next() % FORBIDDEN_POOLS.len()];
        let normalized = normalize_allergies(forbidden);
        let results = retriever(&store)
            .search_safe("receta para niños", forbidden, 10)
            .await
            .unwrap();

        for text in &results {
            let lowered = text.to_lowercase();
            for (word, allergen) in ALLERGEN_WORDS {
                if normalized.contains(allergen) {
                    assert!(
                        !lowered.contains(word),
                        "unsafe text returned for forbidden {:?}: {}",
                        forbidden,
                        text
                    );
                }
            }
        }
    }
}
