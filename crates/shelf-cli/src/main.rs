mod shop;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shelf_filter::RatingThreshold;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shelf")]
#[command(about = "Browse and filter the bookstore catalog from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the category and type facets and the catalog price range
    Facets {
        #[command(flatten)]
        source: SourceArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Filter the catalog the way the shop page does
    Filter {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Print the full shop view as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Where to read the catalog from.
#[derive(Debug, Clone, Args)]
struct SourceArgs {
    /// Catalog file (JSON or YAML); defaults to `SHELF_CATALOG_PATH`
    #[arg(long, conflicts_with = "api_url")]
    catalog: Option<PathBuf>,
    /// Fetch from a running catalog API instead of a file
    #[arg(long)]
    api_url: Option<String>,
    /// Fetch from the API at `SHELF_API_URL`
    #[arg(long, conflicts_with = "catalog")]
    remote: bool,
    /// Re-issue a failed fetch up to this many times
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

/// Shop filter selections.
#[derive(Debug, Clone, Default, Args)]
struct FilterArgs {
    /// Case-insensitive search over name, writer, category and type
    #[arg(long)]
    search: Option<String>,
    /// Category to include (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Type to include (repeatable)
    #[arg(long = "type")]
    types: Vec<String>,
    /// Minimum rating, 1 to 4 stars (repeatable)
    #[arg(long = "rating")]
    ratings: Vec<RatingThreshold>,
    /// Lowest price, in whole currency units
    #[arg(long)]
    min_price: Option<String>,
    /// Highest price, in whole currency units
    #[arg(long)]
    max_price: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = shelf_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Facets { source, json }) => {
            shop::run_facets(&config, &source, json).await?;
        }
        Some(Commands::Filter {
            source,
            filters,
            json,
        }) => shop::run_filter(&config, &source, &filters, json).await?,
        None => println!("shelf: run `shelf --help` for available commands"),
    }

    Ok(())
}
