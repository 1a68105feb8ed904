//! # Command Line
//!
//! Arguments of the `mango-storefront` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mango_core::Category;

#[derive(Debug, Parser)]
#[command(name = "mango-storefront")]
#[command(about = "Browse, filter and shop a mango catalog from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Mode>,

    /// Config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (JSON); defaults to the built-in catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Interactive storefront (default)
    Shell,

    /// Print the filtered catalog and exit
    List(ListArgs),
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Search text
    #[arg(long)]
    pub query: Option<String>,

    /// Category to include (repeatable)
    #[arg(long)]
    pub category: Vec<Category>,

    /// Variety to include (repeatable)
    #[arg(long)]
    pub variety: Vec<String>,

    /// Lowest price in dollars
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price in dollars
    #[arg(long)]
    pub max_price: Option<f64>,

    /// popularity, price-low, price-high, rating or newest
    #[arg(long)]
    pub sort: Option<String>,

    /// Hide out-of-stock products
    #[arg(long)]
    pub in_stock: bool,
}
