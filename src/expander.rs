//! Recursive expansion of a target item into a full build plan.
//!
//! Starting from the requested item, every recipe is resolved (substituting
//! requested alternates), sized into buildings and then expanded into its
//! ingredients. Items without a recipe end up in the raw material totals.
//! An item reached through several consumers keeps a single row whose
//! quantity is the sum of every demand.

use tracing::{debug, trace};

use crate::fraction::{parse_fraction, ParseError};
use crate::models::{BuildPlan, BuildRow, Catalog, Recipe};

/// Errors that abort an expansion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpandError {
    /// The requested item has no recipe in the catalog.
    #[error("no recipe for item '{0}'")]
    UnknownItem(String),

    /// The requested quantity is not a positive finite number.
    #[error("quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),

    /// A recipe contains a malformed ratio string.
    #[error("malformed ratio in recipe for '{item}': {source}")]
    Ratio {
        item: String,
        #[source]
        source: ParseError,
    },

    /// A recipe's building throughput is zero or negative.
    #[error("building max for '{item}' must be positive, got {max}")]
    InvalidBuildingMax { item: String, max: f64 },

    /// A requested alternate matched but has no recipe of its own.
    #[error("alternate '{alternate}' for '{item}' has no recipe in the catalog")]
    UnknownAlternate { item: String, alternate: String },

    /// The recipe graph loops back onto an item already being expanded.
    #[error("recipe cycle at '{item}': {}", .chain.join(" -> "))]
    Cycle { item: String, chain: Vec<String> },

    /// Demand overflowed to infinity.
    #[error("demand for '{item}' is not finite")]
    NonFiniteDemand { item: String },

    /// A raw material or by-product total overflowed to infinity.
    #[error("total for '{item}' is not finite")]
    NonFiniteTotal { item: String },

    /// Covering the demand needs more buildings than a `u64` can count.
    #[error("demand {quantity} for '{item}' needs too many buildings")]
    TooManyBuildings { item: String, quantity: f64 },
}

/// How demand is passed on to ingredients when an item is visited again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DemandPropagation {
    /// Re-expand ingredients (and accrue by-products) with the merged total.
    /// Shared sub-trees accumulate additively at every generation.
    #[default]
    Cumulative,
    /// Re-expand ingredients (and accrue by-products) with only the newly
    /// added demand.
    ///
    /// Rows deeper than a shared item, raw materials and by-products come
    /// out lower than with [`DemandPropagation::Cumulative`] whenever an item
    /// has more than one consumer. This mode does not reproduce the
    /// cumulative totals.
    Incremental,
}

/// Tuning for [`expand_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    pub propagation: DemandPropagation,
}

/// Smallest positive `n` such that `max * n >= quantity`.
///
/// Saturates at `u64::MAX` when `quantity / max` does not fit; the
/// expansion rejects such demand before sizing.
///
/// # Example
///
/// ```
/// use buildchain::expander::building_count;
///
/// assert_eq!(building_count(12.0, 5.0), 3);
/// assert_eq!(building_count(10.0, 5.0), 2);
/// assert_eq!(building_count(0.5, 5.0), 1);
/// ```
pub fn building_count(quantity: f64, max: f64) -> u64 {
    // `as` saturates, so NaN lands on 0 and is clamped below
    let mut count = ((quantity / max).ceil() as u64).max(1);

    // ceil() on the quotient can be off by one from the product check
    while count > 1 && max * (count - 1) as f64 >= quantity {
        count -= 1;
    }
    while count < u64::MAX && max * (count as f64) < quantity {
        count += 1;
    }
    count
}

/// Utilization, in percent, of `count` buildings of throughput `max`.
pub fn efficiency(quantity: f64, max: f64, count: u64) -> f64 {
    quantity / (max * count as f64) * 100.0
}

/// Expands `item` into a build plan using the default options.
///
/// # Arguments
///
/// * `item` - The item to produce; must have a recipe in `catalog`
/// * `quantity` - Target throughput, positive
/// * `alternates` - Alternate recipe names to substitute wherever offered
/// * `catalog` - The recipe catalog
///
/// # Example
///
/// ```
/// use buildchain::expander::expand;
/// use buildchain::models::{Catalog, Recipe};
///
/// let catalog = Catalog::new()
///     .with_recipe("Widget", Recipe::new("Assembler", "5").ingredient("Bolt", "2"))
///     .with_raw("Bolt");
///
/// let plan = expand("Widget", 12.0, &[], &catalog).unwrap();
/// let row = plan.table.get("Widget").unwrap();
/// assert_eq!(row.building_count, 3);
/// assert_eq!(plan.raw_materials["Bolt"], 24.0);
/// ```
pub fn expand(
    item: &str,
    quantity: f64,
    alternates: &[String],
    catalog: &Catalog,
) -> Result<BuildPlan, ExpandError> {
    expand_with(item, quantity, alternates, catalog, ExpandOptions::default())
}

/// Expands `item` into a build plan.
///
/// The target is checked before any expansion happens: it must have a
/// recipe, and `quantity` must be positive and finite. A fresh set of
/// accumulators is used for every call.
pub fn expand_with(
    item: &str,
    quantity: f64,
    alternates: &[String],
    catalog: &Catalog,
    options: ExpandOptions,
) -> Result<BuildPlan, ExpandError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ExpandError::InvalidQuantity(quantity));
    }
    if !catalog.is_craftable(item) {
        return Err(ExpandError::UnknownItem(item.to_string()));
    }

    debug!(item, quantity, ?alternates, "expanding build plan");

    let mut expansion = Expansion {
        catalog,
        alternates,
        options,
        plan: BuildPlan::default(),
        chain: Vec::new(),
    };
    expansion.visit(item, quantity)?;

    debug!(
        rows = expansion.plan.table.len(),
        raw_materials = expansion.plan.raw_materials.len(),
        by_products = expansion.plan.by_products.len(),
        "expansion finished"
    );
    Ok(expansion.plan)
}

/// State threaded through one expansion.
struct Expansion<'a> {
    catalog: &'a Catalog,
    alternates: &'a [String],
    options: ExpandOptions,
    plan: BuildPlan,
    /// Items currently being expanded, outermost first.
    chain: Vec<String>,
}

impl<'a> Expansion<'a> {
    fn visit(&mut self, item: &str, demand: f64) -> Result<(), ExpandError> {
        if !demand.is_finite() {
            return Err(ExpandError::NonFiniteDemand {
                item: item.to_string(),
            });
        }

        let catalog = self.catalog;
        let Some(base) = catalog.recipe(item) else {
            trace!(item, demand, "raw material");
            let total = self.plan.raw_materials.entry(item.to_string()).or_insert(0.0);
            *total += demand;
            if !total.is_finite() {
                return Err(ExpandError::NonFiniteTotal {
                    item: item.to_string(),
                });
            }
            return Ok(());
        };

        if self.chain.iter().any(|entry| entry == item) {
            let mut chain = self.chain.clone();
            chain.push(item.to_string());
            return Err(ExpandError::Cycle {
                item: item.to_string(),
                chain,
            });
        }

        let (name, recipe) = self.resolve_alternate(item, base)?;

        let previous = self.plan.table.get(name).map_or(0.0, |row| row.quantity);
        let quantity = previous + demand;
        let propagated = match self.options.propagation {
            DemandPropagation::Cumulative => quantity,
            DemandPropagation::Incremental => demand,
        };

        let max = ratio(name, &recipe.building.max)?;
        if max <= 0.0 {
            return Err(ExpandError::InvalidBuildingMax {
                item: name.to_string(),
                max,
            });
        }
        if quantity / max >= u64::MAX as f64 {
            return Err(ExpandError::TooManyBuildings {
                item: name.to_string(),
                quantity,
            });
        }
        let count = building_count(quantity, max);
        let utilization = efficiency(quantity, max, count);

        for (by_product, yield_ratio) in &recipe.by_products {
            let amount = ratio(name, yield_ratio)? * propagated;
            let total = self.plan.by_products.entry(by_product.clone()).or_insert(0.0);
            *total += amount;
            if !total.is_finite() {
                return Err(ExpandError::NonFiniteTotal {
                    item: by_product.clone(),
                });
            }
        }

        debug!(item = name, quantity, count, utilization, "build row");
        self.plan.table.upsert(BuildRow {
            item: name.to_string(),
            quantity,
            building_type: recipe.building.building_type.clone(),
            building_count: count,
            efficiency: utilization,
        });

        self.chain.push(item.to_string());
        for (ingredient, consumption) in &recipe.ingredients {
            let needed = propagated * ratio(name, consumption)?;
            self.visit(ingredient, needed)?;
        }
        self.chain.pop();

        Ok(())
    }

    /// Walks the requested alternates in order, switching whenever the
    /// active recipe offers one. A switch can be followed by another if the
    /// alternate's own recipe lists a later requested name.
    fn resolve_alternate<'s>(
        &self,
        item: &'s str,
        base: &'a Recipe,
    ) -> Result<(&'s str, &'a Recipe), ExpandError>
    where
        'a: 's,
    {
        let (catalog, alternates) = (self.catalog, self.alternates);
        let mut active: (&'s str, &'a Recipe) = (item, base);

        for requested in alternates {
            if !active.1.alts.contains(requested) {
                continue;
            }
            let recipe = catalog
                .recipe(requested)
                .ok_or_else(|| ExpandError::UnknownAlternate {
                    item: active.0.to_string(),
                    alternate: requested.clone(),
                })?;
            active = (requested.as_str(), recipe);
        }

        Ok(active)
    }
}

fn ratio(item: &str, value: &str) -> Result<f64, ExpandError> {
    parse_fraction(value).map_err(|source| ExpandError::Ratio {
        item: item.to_string(),
        source,
    })
}
