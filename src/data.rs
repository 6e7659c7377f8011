//! Recipe catalog loading for Buildchain.
//!
//! The catalog is a single JSON object mapping item names to recipes.
//! Items mapped to `null` are raw materials:
//!
//! ```json
//! {
//!   "Iron Plate": {
//!     "ingredients": { "Iron Ingot": "3/2" },
//!     "building": { "type": "Constructor", "max": "20" }
//!   },
//!   "Iron Ore": null
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::Catalog;

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or does not match the recipe format.
    #[error("invalid catalog {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Parses a catalog from a JSON string.
///
/// # Example
///
/// ```
/// use buildchain::data::parse_catalog;
///
/// let catalog = parse_catalog(r#"{
///     "Widget": {
///         "ingredients": { "Bolt": "2" },
///         "building": { "type": "Assembler", "max": "5" }
///     },
///     "Bolt": null
/// }"#).unwrap();
///
/// assert!(catalog.is_craftable("Widget"));
/// assert!(!catalog.is_craftable("Bolt"));
/// ```
pub fn parse_catalog(json: &str) -> Result<Catalog, DataError> {
    serde_json::from_str(json).map_err(|source| DataError::Json {
        path: PathBuf::from("<inline>"),
        source,
    })
}

/// Loads a catalog from a JSON file.
///
/// # Arguments
///
/// * `path` - Path to the catalog file (typically `recipes.json`)
///
/// # Returns
///
/// The parsed [`Catalog`], or an error if the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Catalog, DataError> {
    let contents = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog: Catalog = serde_json::from_str(&contents).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        entries = catalog.len(),
        craftable = catalog.craftable_items().count(),
        "loaded catalog"
    );
    Ok(catalog)
}
