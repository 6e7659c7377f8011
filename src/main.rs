//! Buildchain - Command Line Interface
//!
//! This is the main entry point for the build plan calculator.
//! Run with `--help` to see all available options.

use clap::{Parser, ValueEnum};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use buildchain::{
    data::load_catalog,
    display::{display_build_plan, to_json, write_csv},
    expander::{expand_with, DemandPropagation, ExpandOptions},
};

/// Output format for the build plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Aligned text tables
    Table,
    /// The whole plan as JSON
    Json,
    /// The build table as CSV
    Csv,
}

/// Command-line arguments for Buildchain.
#[derive(Parser, Debug)]
#[command(name = "buildchain")]
#[command(author, version, about = "Expand a recipe catalog into a full factory build plan", long_about = None)]
struct Args {
    /// Item to produce
    item: String,

    /// Quantity of the item to produce
    #[arg(short, long, default_value = "1.0")]
    quantity: f64,

    /// Swap to alternate recipes (repeatable)
    #[arg(short, long = "alts", value_name = "NAME")]
    alts: Vec<String>,

    /// Path to the recipe catalog
    #[arg(short, long, default_value = "recipes.json")]
    recipes: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,

    /// Pass only newly added demand to shared ingredients
    #[arg(long, default_value = "false")]
    incremental: bool,

    /// Log expansion steps to stderr
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("buildchain={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if !args.recipes.exists() {
        eprintln!(
            "Error: catalog '{}' not found. Pass --recipes or run from the directory holding it.",
            args.recipes.display()
        );
        std::process::exit(1);
    }

    let catalog = load_catalog(&args.recipes)?;

    let options = ExpandOptions {
        propagation: if args.incremental {
            DemandPropagation::Incremental
        } else {
            DemandPropagation::Cumulative
        },
    };

    let plan = expand_with(&args.item, args.quantity, &args.alts, &catalog, options)?;

    match args.format {
        Format::Table => display_build_plan(&plan),
        Format::Json => println!("{}", to_json(&plan)?),
        Format::Csv => write_csv(&plan, io::stdout().lock())?,
    }

    Ok(())
}
