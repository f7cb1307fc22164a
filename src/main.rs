//! Recetario CLI entrypoint: ingest a recipe dataset, run safe searches.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use recetario::config::Config;
use recetario::constants::DEFAULT_TOP_K;
use recetario::document::{ChunkingConfig, DocumentBuilder};
use recetario::embedding::StubEmbedder;
use recetario::ingest::{IngestConfig, IngestionPipeline};
use recetario::recipe::load_recipes;
use recetario::retrieval::{RetrievalConfig, SafeRecipeRetriever};
use recetario::vectordb::QdrantClient;

#[derive(Parser)]
#[command(
    name = "recetario",
    about = "Safe recipe retrieval for children with food allergies",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the recipe dataset into the vector collection.
    Ingest {
        /// Dataset path (overrides RECETARIO_DATASET_PATH).
        #[arg(long)]
        dataset: Option<PathBuf>,
    },
    /// Search recipes, strictly excluding the given allergens.
    Search {
        /// Natural-language query.
        query: String,
        /// Allergens to exclude, comma-separated (e.g. `leche,egg`).
        #[arg(long = "evitar", value_delimiter = ',')]
        evitar: Vec<String>,
        /// Number of results.
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;

    let store = QdrantClient::new(&config.qdrant_url).await?;

    // Hosts wire a real sentence encoder through the Embedder trait; the CLI
    // ships with the deterministic stub.
    warn!("No embedding model wired; using the deterministic stub embedder");
    let embedder = StubEmbedder::new(config.embedding_dim)?;

    match cli.command {
        Command::Ingest { dataset } => {
            let dataset_path = dataset.unwrap_or_else(|| config.dataset_path.clone());
            let recipes = load_recipes(&dataset_path)?;
            info!(recipes = recipes.len(), path = %dataset_path.display(), "Dataset loaded");

            let builder =
                DocumentBuilder::new(ChunkingConfig::new(config.chunk_words, config.chunk_overlap))?;
            let pipeline = IngestionPipeline::new(
                embedder,
                store,
                builder,
                IngestConfig {
                    collection_name: config.collection.clone(),
                    vector_size: config.embedding_dim as u64,
                    ..Default::default()
                },
            )?;

            pipeline.ensure_collection().await?;
            let summary = pipeline.ingest(&recipes).await?;

            println!(
                "Ingesta completa: {} documentos almacenados ({} recetas sin id, {} con etiquetas en conflicto)",
                summary.documents_stored,
                summary.recipes_skipped,
                summary.conflicting.len()
            );
        }
        Command::Search {
            query,
            evitar,
            top_k,
        } => {
            let retriever = SafeRecipeRetriever::new(
                embedder,
                store,
                RetrievalConfig {
                    collection_name: config.collection.clone(),
                    overfetch_factor: config.overfetch_factor,
                },
            )?;

            let outcome = retriever.search_safe_detailed(&query, &evitar, top_k).await?;

            if !outcome.unenforced_terms.is_empty() {
                println!(
                    "Aviso: no se reconocieron estas alergias y NO se pudieron excluir: {}",
                    outcome.unenforced_terms.join(", ")
                );
            }

            if outcome.hits.is_empty() {
                println!(
                    "No encontré recetas seguras para esa búsqueda con las restricciones indicadas."
                );
            } else {
                for (index, hit) in outcome.hits.iter().enumerate() {
                    println!("--- Resultado {} (score {:.3}) ---", index + 1, hit.score);
                    println!("{}\n", hit.text);
                }
            }
        }
    }

    Ok(())
}
