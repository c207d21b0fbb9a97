mod export;
mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::scrape::BrowseArgs;

#[derive(Debug, Parser)]
#[command(name = "dealhunter")]
#[command(about = "Scrape DealsHeaven deal listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every store and category listing plus the deal tabs into a CSV file
    Export {
        /// Output file (defaults to `DEALHUNTER_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pages one listing walk may visit; 0 removes the bound
        #[arg(long)]
        max_pages: Option<u32>,

        /// Listing walks run at once
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Scrape one listing or deal tab and print the records as JSON lines
    Browse {
        /// Store label or slug, or "All Stores"
        #[arg(long, default_value = "All Stores")]
        store: String,

        /// Category label or slug, or "All Categories"
        #[arg(long, default_value = "All Categories")]
        category: String,

        /// Deal tab to scrape instead of the listing
        #[arg(long)]
        deal: Option<String>,

        #[arg(long, default_value_t = 1)]
        start_page: u32,

        #[arg(long, default_value_t = 1)]
        end_page: u32,

        /// Keep only records whose title contains this text
        #[arg(long)]
        query: Option<String>,
    },
    /// Print the first URL of every batch job without fetching anything
    Urls,
    /// Count the rows of an exported CSV file per store
    Inspect {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = dealhunter_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export {
            output,
            max_pages,
            concurrency,
        } => {
            let settings =
                scrape::resolve_export_settings(&config, output, max_pages, concurrency)?;
            scrape::run_export(&config, &settings).await?;
        }
        Commands::Browse {
            store,
            category,
            deal,
            start_page,
            end_page,
            query,
        } => {
            let args = BrowseArgs {
                store,
                category,
                deal,
                start_page,
                end_page,
                query,
            };
            scrape::run_browse(&config, &args).await?;
        }
        Commands::Urls => scrape::run_urls(&config)?,
        Commands::Inspect { path } => scrape::run_inspect(&path)?,
    }

    Ok(())
}
