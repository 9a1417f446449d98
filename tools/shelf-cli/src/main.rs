//! Shelf CLI - inspect storefront catalogs from the command line.
//!
//! Commands:
//! - `shelf facets` - List brand/category facets and price bounds
//! - `shelf filter` - Filter products, flat or grouped as a listing page
//! - `shelf chips` - Show active-filter chips and their count
//! - `shelf listing` - Load a brand or category listing through the cache
//! - `shelf product` - Show a single product page
//! - `shelf slug` - Build a URL slug
//! - `shelf config` - Print the effective configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ChipsArgs, FacetsArgs, FilterArgs, ListingArgs, ProductArgs, SlugArgs};

/// Shelf CLI - Inspect storefront catalogs
#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Product data file: a JSON array or an API listing envelope
    #[arg(short, long, global = true)]
    products: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List brand and category facets with price bounds
    Facets(FacetsArgs),

    /// Filter products
    Filter(FilterArgs),

    /// Show active-filter chips and count
    Chips(ChipsArgs),

    /// Load a brand or category listing page
    Listing(ListingArgs),

    /// Show a single product
    Product(ProductArgs),

    /// Build a URL slug from segments
    Slug(SlugArgs),

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = output::Output::new(cli.verbose, cli.json);

    let loaded = context::Context::load(
        cli.config.as_deref(),
        cli.products.as_deref(),
        output.clone(),
    );
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Facets(args) => commands::facets::run(args, &ctx).await,
        Commands::Filter(args) => commands::filter::run(args, &ctx).await,
        Commands::Chips(args) => commands::chips::run(args, &ctx).await,
        Commands::Listing(args) => commands::listing::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Slug(args) => commands::slug::run(args, &ctx).await,
        Commands::Config => commands::config::run(&ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
