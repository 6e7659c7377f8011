//! Display and formatting utilities for Buildchain.
//!
//! This module renders a finished [`BuildPlan`] as a text table for the
//! terminal, and exports it as CSV or JSON.

use std::fmt::Write as _;
use std::io;

use indexmap::IndexMap;

use crate::models::{BuildPlan, BuildTable};

const RULE: &str = "--------------------------------------------------------------------------------";

/// Formats a quantity with four decimal places.
///
/// # Example
///
/// ```
/// use buildchain::display::format_quantity;
///
/// assert_eq!(format_quantity(12.0), "12.0000");
/// assert_eq!(format_quantity(2.0 / 3.0), "0.6667");
/// ```
pub fn format_quantity(quantity: f64) -> String {
    format!("{:.4}", quantity)
}

/// Renders the build table, headed by the requested item.
pub fn render_build_table(table: &BuildTable) -> String {
    let mut out = String::new();

    if let Some(target) = table.target() {
        let _ = writeln!(
            out,
            "Recipe: {} {}",
            format_quantity(target.quantity),
            target.item
        );
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "{:<25} {:<10} {:<15} {:<13} {:<10}",
        "Item", "Quantity", "Bldg Type", "Bldg Quantity", "Efficiency"
    );
    let _ = writeln!(out, "{}", RULE);
    for row in table {
        let _ = writeln!(
            out,
            "{:<25} {:<10} {:<15} {:<13} {:<10}",
            row.item,
            format_quantity(row.quantity),
            row.building_type,
            row.building_count,
            format!("{}%", format_quantity(row.efficiency)),
        );
    }

    out
}

/// Renders a name -> quantity listing under a section title.
pub fn render_totals(title: &str, totals: &IndexMap<String, f64>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", title);
    let _ = writeln!(out, "{}", RULE);

    if totals.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (name, quantity) in totals {
        let _ = writeln!(out, "{:<25} {:<10}", name, format_quantity(*quantity));
    }

    out
}

/// Renders the complete plan: build table, raw materials and by-products.
pub fn render_build_plan(plan: &BuildPlan) -> String {
    let mut out = String::new();
    out.push_str("[BUILD PLAN]\n");
    out.push_str(&render_build_table(&plan.table));
    out.push('\n');
    out.push_str(&render_totals("RAW MATERIALS", &plan.raw_materials));
    out.push('\n');
    out.push_str(&render_totals("BY-PRODUCTS", &plan.by_products));
    out
}

/// Prints the complete plan to stdout.
pub fn display_build_plan(plan: &BuildPlan) {
    println!();
    print!("{}", render_build_plan(plan));
    println!();
}

/// Writes the build table as CSV, one record per row.
///
/// Columns: `item, quantity, building_type, building_count, efficiency`.
pub fn write_csv<W: io::Write>(plan: &BuildPlan, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in &plan.table {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serializes the whole plan as pretty-printed JSON.
pub fn to_json(plan: &BuildPlan) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(plan)
}
