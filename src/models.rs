//! Data models and structures for Buildchain.
//!
//! This module contains the recipe catalog as it is read from disk and the
//! build plan produced by an expansion: the build table plus the raw
//! material and by-product totals.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The building a recipe runs in.
///
/// `max` is a ratio string (`"a"` or `"a/b"`) giving the output one
/// instance of the building can sustain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Building type name (e.g. "Assembler")
    #[serde(rename = "type")]
    pub building_type: String,
    /// Maximum throughput of one building, as a ratio string
    pub max: String,
}

/// A rule converting ingredients into one unit of output.
///
/// # Example
///
/// ```
/// use buildchain::models::Recipe;
///
/// let widget = Recipe::new("Assembler", "5")
///     .ingredient("Bolt", "2")
///     .by_product("Shavings", "1/4");
///
/// assert_eq!(widget.building.building_type, "Assembler");
/// assert_eq!(widget.ingredients["Bolt"], "2");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Ingredient name -> consumption per one unit of output
    #[serde(default)]
    pub ingredients: IndexMap<String, String>,
    /// Building this recipe runs in
    pub building: Building,
    /// Names of alternate recipes for this item, in catalog order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alts: Vec<String>,
    /// By-product name -> yield per one unit of output
    #[serde(
        default,
        rename = "by-products",
        alias = "by_products",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub by_products: IndexMap<String, String>,
}

impl Recipe {
    /// Creates a recipe with no ingredients, alternates or by-products.
    pub fn new(building_type: impl Into<String>, max: impl Into<String>) -> Self {
        Recipe {
            ingredients: IndexMap::new(),
            building: Building {
                building_type: building_type.into(),
                max: max.into(),
            },
            alts: Vec::new(),
            by_products: IndexMap::new(),
        }
    }

    pub fn ingredient(mut self, name: impl Into<String>, ratio: impl Into<String>) -> Self {
        self.ingredients.insert(name.into(), ratio.into());
        self
    }

    pub fn by_product(mut self, name: impl Into<String>, ratio: impl Into<String>) -> Self {
        self.by_products.insert(name.into(), ratio.into());
        self
    }

    pub fn alt(mut self, name: impl Into<String>) -> Self {
        self.alts.push(name.into());
        self
    }
}

/// Every known item, keyed by name.
///
/// An entry mapped to `null` declares a raw material explicitly; any name
/// missing from the catalog is treated as raw as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: IndexMap<String, Option<Recipe>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the recipe for `name`.
    pub fn with_recipe(mut self, name: impl Into<String>, recipe: Recipe) -> Self {
        self.entries.insert(name.into(), Some(recipe));
        self
    }

    /// Declares `name` as a raw material.
    pub fn with_raw(mut self, name: impl Into<String>) -> Self {
        self.entries.insert(name.into(), None);
        self
    }

    /// Returns the recipe for `name`, or `None` for raw materials.
    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    /// Whether `name` has an entry at all, including `null` entries.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_craftable(&self, name: &str) -> bool {
        self.recipe(name).is_some()
    }

    /// Names of all items with a recipe, in catalog order.
    pub fn craftable_items(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, recipe)| recipe.is_some())
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One line of the build plan: a produced item and the buildings it needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildRow {
    /// Item name (the alternate recipe name when one was substituted)
    pub item: String,
    /// Total demand for this item across every consumer
    pub quantity: f64,
    /// Building type producing this item
    pub building_type: String,
    /// Smallest number of buildings covering `quantity`
    pub building_count: u64,
    /// Utilization of those buildings, in percent
    pub efficiency: f64,
}

/// Build rows in first-encountered order, at most one per item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BuildTable {
    rows: Vec<BuildRow>,
}

impl BuildTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self, item: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.item == item)
    }

    pub fn get(&self, item: &str) -> Option<&BuildRow> {
        self.rows.iter().find(|row| row.item == item)
    }

    /// Appends `row`, or replaces the existing row for the same item in place.
    pub fn upsert(&mut self, row: BuildRow) {
        match self.position(&row.item) {
            Some(index) => self.rows[index] = row,
            None => self.rows.push(row),
        }
    }

    /// The first row, which is the requested item for a finished plan.
    pub fn target(&self) -> Option<&BuildRow> {
        self.rows.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BuildRow> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[BuildRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a BuildTable {
    type Item = &'a BuildRow;
    type IntoIter = std::slice::Iter<'a, BuildRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Raw material name -> total quantity consumed.
pub type RawMaterials = IndexMap<String, f64>;

/// By-product name -> total quantity generated.
pub type ByProducts = IndexMap<String, f64>;

/// The finished result of one expansion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildPlan {
    pub table: BuildTable,
    pub raw_materials: RawMaterials,
    pub by_products: ByProducts,
}
