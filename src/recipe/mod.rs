//! Recipe data model and dataset loading.

mod dataset;


pub use dataset::{DatasetError, load_recipes};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::allergen::Allergen;

/// One ingredient entry with optional quantity and preparation notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Ingredient list entries as they appear in source datasets: structured
/// records, bare strings, or anything else. Unrecognized shapes flatten to an
/// empty string downstream instead of failing the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientEntry {
    Structured(Ingredient),
    Plain(String),
    Other(serde_json::Value),
}

impl IngredientEntry {
    /// Flattens the entry to a single display line: `quantity name (notes)`.
    pub fn flatten(&self) -> String {
        match self {
            IngredientEntry::Structured(ingredient) => {
                let mut line = match &ingredient.quantity {
                    Some(quantity) => format!("{} {}", quantity, ingredient.name),
                    None => ingredient.name.clone(),
                };
                if let Some(notes) = &ingredient.notes {
                    line.push_str(&format!(" ({})", notes));
                }
                line
            }
            IngredientEntry::Plain(name) => name.clone(),
            IngredientEntry::Other(_) => String::new(),
        }
    }
}

/// Canonical recipe representation inside the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique, stable identifier.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<IngredientEntry>,
    pub steps: Vec<String>,
    /// Canonical allergens the recipe is certified safe against.
    #[serde(default)]
    pub safe_for: BTreeSet<Allergen>,
    /// Canonical allergens present in the recipe.
    #[serde(default)]
    pub contains: BTreeSet<Allergen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recipe {
    /// Allergens claimed both safe-for and contained. A recipe cannot be
    /// certified safe against an allergen it contains; a non-empty result
    /// means the record must be flagged at ingestion.
    pub fn conflicting_allergens(&self) -> BTreeSet<Allergen> {
        self.safe_for.intersection(&self.contains).copied().collect()
    }
}
