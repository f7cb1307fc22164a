//! Converts recipes into retrievable documents.
//!
//! A recipe becomes one canonical text representation, split into overlapping
//! word-window chunks. Every chunk from the same recipe carries the same
//! allergen metadata: allergens are a property of the recipe, not the chunk.

mod chunking;


pub use chunking::{ChunkingConfig, ChunkingError, chunk_text};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::allergen::{Allergen, detect_allergens_from_text};
use crate::recipe::Recipe;

/// Allergen and provenance metadata attached to every chunk of a recipe.
///
/// Validated once at the ingestion boundary; the retriever's filter logic
/// assumes this fixed shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub recipe_id: String,
    /// Canonical allergens present in the recipe.
    pub contains: BTreeSet<Allergen>,
    /// Canonical allergens the recipe is certified safe against.
    pub safe_for: BTreeSet<Allergen>,
    pub age_range: Option<String>,
}

impl DocumentMetadata {
    /// `contains` as sorted canonical codes, the store payload representation.
    pub fn contains_codes(&self) -> Vec<String> {
        self.contains.iter().map(|a| a.code().to_string()).collect()
    }

    /// `safe_for` as sorted canonical codes.
    pub fn safe_for_codes(&self) -> Vec<String> {
        self.safe_for.iter().map(|a| a.code().to_string()).collect()
    }
}

/// One retrievable unit: a text chunk plus recipe-level metadata.
///
/// Derived, never authored. Immutable once stored; re-ingestion supersedes by
/// id rather than mutating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDocument {
    /// Deterministic composite id: `{recipe_id}_chunk_{index}`.
    pub doc_id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
}

/// Builds retrievable documents from recipes.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    chunking: ChunkingConfig,
}

impl DocumentBuilder {
    pub fn new(chunking: ChunkingConfig) -> Result<Self, ChunkingError> {
        chunking.validate()?;
        Ok(Self { chunking })
    }

    pub fn chunking(&self) -> &ChunkingConfig {
        &self.chunking
    }

    /// Produces the ordered chunk documents for one recipe.
    ///
    /// When the recipe declares no `contains` allergens, they are derived
    /// from the canonical text via [`detect_allergens_from_text`].
    pub fn build(&self, recipe: &Recipe) -> Vec<RecipeDocument> {
        let text = canonical_text(recipe);

        let contains = if recipe.contains.is_empty() {
            detect_allergens_from_text(&text)
        } else {
            recipe.contains.clone()
        };

        let metadata = DocumentMetadata {
            recipe_id: recipe.id.clone(),
            contains,
            safe_for: recipe.safe_for.clone(),
            age_range: recipe.age_range.clone(),
        };

        chunk_text(&text, self.chunking.window_words, self.chunking.overlap_words)
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| RecipeDocument {
                doc_id: format!("{}_chunk_{}", recipe.id, index),
                text: chunk,
                metadata: metadata.clone(),
            })
            .collect()
    }
}

/// Canonical text representation of a recipe: title, description,
/// ingredients, preparation steps, in fixed field order so embedding
/// similarity is stable across ingestion runs.
pub fn canonical_text(recipe: &Recipe) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|entry| entry.flatten())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    let mut text = format!("Título: {}", recipe.title);

    if let Some(description) = &recipe.description {
        text.push_str(&format!("\nDescripción: {}", description));
    }

    text.push_str(&format!("\nIngredientes: {}", ingredients));
    text.push_str(&format!("\nPreparación: {}", recipe.steps.join(" ")));

    text
}
