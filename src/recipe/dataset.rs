use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use super::Recipe;

#[derive(Debug, Error)]
/// Errors loading a recipe dataset.
pub enum DatasetError {
    /// Dataset file does not exist.
    #[error("recipe dataset not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Dataset file could not be read.
    #[error("failed to read recipe dataset '{path}': {source}")]
    ReadFailed {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Dataset is not a JSON array.
    #[error("recipe dataset '{path}' is not a JSON array: {reason}")]
    InvalidFormat {
        /// Path that was parsed.
        path: PathBuf,
        /// Parse error message.
        reason: String,
    },
}

/// Loads recipes from a JSON array file.
///
/// A record that fails to deserialize (missing required fields, unknown
/// allergen codes) is skipped with a warning; the rest of the batch loads.
/// A missing or non-array file is an error.
pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&raw).map_err(|e| DatasetError::InvalidFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let total = records.len();
    let mut recipes = Vec::with_capacity(total);

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Recipe>(record) {
            Ok(recipe) => recipes.push(recipe),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed recipe record");
            }
        }
    }

    if recipes.len() < total {
        warn!(
            loaded = recipes.len(),
            skipped = total - recipes.len(),
            "Dataset loaded with skipped records"
        );
    }

    Ok(recipes)
}
