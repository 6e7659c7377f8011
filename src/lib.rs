//! # Buildchain
//!
//! A command-line tool and library that expands a crafting recipe catalog
//! into the full production chain for a target item.
//!
//! Given a target item and throughput, Buildchain works out:
//!
//! - One build row per produced item: total quantity, building type,
//!   building count and building efficiency
//! - The raw materials consumed (items with no recipe)
//! - The by-products generated along the way
//!
//! ## Modules
//!
//! - [`models`] - Recipes, the catalog and the build plan structures
//! - [`fraction`] - Parsing of `"a"` / `"a/b"` ratio strings
//! - [`expander`] - The recursive expansion engine
//! - [`data`] - JSON catalog loading
//! - [`display`] - Table, CSV and JSON output
//! - [`wasm`] - WebAssembly bindings
//!
//! ## Example Usage
//!
//! ```no_run
//! use buildchain::{data::load_catalog, display::display_build_plan, expander::expand};
//! use std::path::Path;
//!
//! let catalog = load_catalog(Path::new("data/recipes.json")).unwrap();
//!
//! // 10 reinforced plates per minute, using the bolted alternate
//! let alts = vec!["Alternate: Bolted Iron Plate".to_string()];
//! let plan = expand("Reinforced Iron Plate", 10.0, &alts, &catalog).unwrap();
//!
//! display_build_plan(&plan);
//! ```
//!
//! ## Shared ingredients
//!
//! An item needed by several consumers gets a single row holding the sum of
//! every demand. By default each new demand re-expands the item's
//! ingredients with the merged total
//! ([`expander::DemandPropagation::Cumulative`]); the
//! [`expander::DemandPropagation::Incremental`] mode passes on only the new
//! demand instead.

pub mod data;
pub mod display;
pub mod expander;
pub mod fraction;
pub mod models;
pub mod wasm;
