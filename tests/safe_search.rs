//! End-to-end safety scenarios against the mock store.

use std::collections::BTreeSet;

use recetario::allergen::Allergen;
use recetario::document::{ChunkingConfig, DocumentBuilder};
use recetario::embedding::StubEmbedder;
use recetario::ingest::{IngestConfig, IngestionPipeline};
use recetario::recipe::{IngredientEntry, Recipe};
use recetario::retrieval::{RetrievalConfig, SafeRecipeRetriever};
use recetario::vectordb::MockVectorDbClient;

const DIM: usize = 32;
const COLLECTION: &str = "recetas_e2e";

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
        age_range: Some("12m+".to_string()),
        tags: vec![],
    }
}

fn pipeline(
    store: &MockVectorDbClient,
) -> IngestionPipeline<StubEmbedder, &MockVectorDbClient> {
    IngestionPipeline::new(
        StubEmbedder::new(DIM).expect("stub embedder"),
        store,
        DocumentBuilder::new(ChunkingConfig::default()).expect("chunking config"),
        IngestConfig {
            collection_name: COLLECTION.to_string(),
            vector_size: DIM as u64,
            ..Default::default()
        },
    )
    .expect("pipeline config")
}

fn retriever(
    store: &MockVectorDbClient,
) -> SafeRecipeRetriever<StubEmbedder, &MockVectorDbClient> {
    SafeRecipeRetriever::new(
        StubEmbedder::new(DIM).expect("stub embedder"),
        store,
        RetrievalConfig {
            collection_name: COLLECTION.to_string(),
            ..Default::default()
        },
    )
    .expect("retriever config")
}

#[tokio::test]
async fn safe_search_excludes_forbidden_allergens() {
    // GIVEN recipes with and without allergens
    let store = MockVectorDbClient::new();
    let pipeline = pipeline(&store);
    pipeline.ensure_collection().await.unwrap();
    pipeline
        .ingest(&[
            recipe("safe_recipe", "Pollo al horno", &["pollo", "sal"], &[]),
            recipe(
                "dangerous_recipe",
                "Torta con huevo",
                &["harina", "egg"],
                &[Allergen::Huevo],
            ),
        ])
        .await
        .unwrap();

    // WHEN performing a safe search
    let results = retriever(&store)
        .search_safe("comida para niños", &["egg"], 5)
        .await
        .unwrap();

    // THEN recipes containing forbidden allergens must be excluded
    let joined = results.join(" ").to_lowercase();
    assert!(!joined.contains("huevo"));
    assert!(!joined.contains("egg"));
    assert!(joined.contains("pollo al horno"));
}

#[tokio::test]
async fn reingestion_does_not_duplicate_documents() {
    let store = MockVectorDbClient::new();
    let pipeline = pipeline(&store);
    pipeline.ensure_collection().await.unwrap();

    let recipes = vec![recipe("safe_recipe", "Pollo al horno", &["pollo"], &[])];
    pipeline.ingest(&recipes).await.unwrap();
    pipeline.ingest(&recipes).await.unwrap();

    assert_eq!(store.point_count(COLLECTION), Some(1));
}

#[tokio::test]
async fn unrecognized_allergy_terms_are_surfaced() {
    let store = MockVectorDbClient::new();
    let pipeline = pipeline(&store);
    pipeline.ensure_collection().await.unwrap();
    pipeline
        .ingest(&[recipe("safe_recipe", "Pollo al horno", &["pollo"], &[])])
        .await
        .unwrap();

    let outcome = retriever(&store)
        .search_safe_detailed("pollo", &["egg", "sulfitos"], 5)
        .await
        .unwrap();

    // The filter could not act on "sulfitos"; callers must see that instead
    // of assuming the results were verified against it.
    assert_eq!(outcome.unenforced_terms, vec!["sulfitos".to_string()]);
}

#[tokio::test]
async fn declared_synonyms_exclude_spanish_labelled_recipes() {
    let store = MockVectorDbClient::new();
    let pipeline = pipeline(&store);
    pipeline.ensure_collection().await.unwrap();
    pipeline
        .ingest(&[
            recipe("arroz", "Arroz con zanahoria", &["arroz", "zanahoria"], &[]),
            recipe(
                "postre_leche",
                "Postre de leche",
                &["leche", "azúcar"],
                &[Allergen::Aplv],
            ),
        ])
        .await
        .unwrap();

    // User says "milk"; the stored recipe says "leche".
    let results = retriever(&store)
        .search_safe("postre", &["milk"], 5)
        .await
        .unwrap();

    let joined = results.join(" ").to_lowercase();
    assert!(!joined.contains("leche"));
}
