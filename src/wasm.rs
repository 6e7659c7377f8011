//! WebAssembly bindings for Buildchain.
//!
//! This module provides JavaScript-accessible functions for the build plan
//! expansion. Inputs and outputs are JSON strings.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::data::parse_catalog;
use crate::expander::{expand_with, DemandPropagation, ExpandOptions};
use crate::models::{BuildPlan, BuildRow, ByProducts, Catalog, RawMaterials};

const EMBEDDED_CATALOG: &str = include_str!("../data/recipes.json");

fn default_quantity() -> f64 {
    1.0
}

/// JavaScript-friendly input for an expansion.
#[derive(Debug, Clone, Deserialize)]
pub struct JsPlanInput {
    pub item: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub alts: Vec<String>,
    /// Recipe catalog; the embedded catalog is used when absent
    #[serde(default)]
    pub catalog: Option<Catalog>,
    #[serde(default)]
    pub incremental: bool,
}

/// JavaScript-friendly expansion result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JsPlanResult {
    pub success: bool,
    pub error: Option<String>,
    pub rows: Vec<BuildRow>,
    pub raw_materials: RawMaterials,
    pub by_products: ByProducts,
}

impl JsPlanResult {
    fn failure(message: String) -> Self {
        log_failure(&message);
        JsPlanResult {
            success: false,
            error: Some(message),
            ..Default::default()
        }
    }
}

impl From<BuildPlan> for JsPlanResult {
    fn from(plan: BuildPlan) -> Self {
        JsPlanResult {
            success: true,
            error: None,
            rows: plan.table.rows().to_vec(),
            raw_materials: plan.raw_materials,
            by_products: plan.by_products,
        }
    }
}

/// Imported browser functions panic off wasm32, so native builds log instead.
fn log_failure(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("{}", message);
}

fn embedded_catalog() -> Result<Catalog, String> {
    parse_catalog(EMBEDDED_CATALOG).map_err(|e| e.to_string())
}

/// Expand a build plan.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn plan(input_json: &str) -> String {
    let result = match serde_json::from_str::<JsPlanInput>(input_json) {
        Ok(input) => run_plan(input),
        Err(e) => JsPlanResult::failure(format!("Invalid input: {}", e)),
    };
    serde_json::to_string(&result).unwrap_or_default()
}

fn run_plan(input: JsPlanInput) -> JsPlanResult {
    let catalog = match input.catalog {
        Some(catalog) => catalog,
        None => match embedded_catalog() {
            Ok(catalog) => catalog,
            Err(e) => return JsPlanResult::failure(e),
        },
    };

    let options = ExpandOptions {
        propagation: if input.incremental {
            DemandPropagation::Incremental
        } else {
            DemandPropagation::Cumulative
        },
    };

    match expand_with(&input.item, input.quantity, &input.alts, &catalog, options) {
        Ok(plan) => plan.into(),
        Err(e) => JsPlanResult::failure(e.to_string()),
    }
}

/// Get the version of the calculator.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the craftable items of a catalog, or of the embedded catalog when
/// `catalog_json` is empty. Returns a JSON array of names.
#[wasm_bindgen]
pub fn get_craftable_items(catalog_json: &str) -> String {
    let catalog = if catalog_json.trim().is_empty() {
        embedded_catalog()
    } else {
        parse_catalog(catalog_json).map_err(|e| e.to_string())
    };

    let names: Vec<&str> = match &catalog {
        Ok(catalog) => catalog.craftable_items().collect(),
        Err(e) => {
            log_failure(e);
            Vec::new()
        }
    };

    serde_json::to_string(&names).unwrap_or_default()
}
