//! Bookdex CLI
//!
//! Local entry point for harvesting the storefront and querying the corpus.

use std::path::PathBuf;
use std::sync::Arc;

use bookdex::{
    error::Result,
    models::Config,
    pipeline,
    search::{TfidfIndex, search},
    storage::{CorpusStore, HubPublisher, LocalStorage},
    utils::http,
};
use clap::{Parser, Subcommand};

/// Bookdex - Campus bookstore harvester and search
#[derive(Parser, Debug)]
#[command(
    name = "bookdex",
    version,
    about = "Harvests new-arrival books and answers text search queries"
)]
struct Cli {
    /// Path to storage directory containing config and corpus files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Harvest the new-arrivals listing into the corpus
    Harvest {
        /// Override the configured listing page cap
        #[arg(long)]
        max_pages: Option<usize>,

        /// Skip corpus publication even if configured
        #[arg(long)]
        no_publish: bool,
    },

    /// Search the corpus with a free-text query
    Search {
        /// Query text
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Validate configuration files
    Validate,

    /// Show current corpus info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let mut config = Config::load_or_default(&config_path);
    let storage = LocalStorage::new(cli.storage_dir.join(&config.store.data_file));

    match cli.command {
        Command::Harvest {
            max_pages,
            no_publish,
        } => {
            if let Some(pages) = max_pages {
                config.crawler.max_pages = pages;
            }
            config.validate()?;

            let publisher = if config.publish.enabled && !no_publish {
                let client = http::create_client(&config.crawler)?;
                match HubPublisher::from_env(&config.publish, client) {
                    Ok(publisher) => Some(publisher),
                    Err(error) => {
                        log::warn!("Publication disabled: {}", error);
                        None
                    }
                }
            } else {
                None
            };

            let stats =
                pipeline::run_harvest(Arc::new(config), &storage, publisher.as_ref()).await?;
            log::info!(
                "Done in {}s, corpus at {:?} ({} records)",
                (stats.end_time - stats.start_time).num_seconds(),
                storage.path(),
                stats.corpus_size
            );
        }

        Command::Search { query, top } => {
            let corpus = storage.load().await?;
            if corpus.is_empty() {
                println!("Corpus is empty. Run 'bookdex harvest' first.");
                return Ok(());
            }

            let index = TfidfIndex::build(&corpus);
            let results = search(&corpus, &index, &query, top);
            if results.is_empty() {
                println!("No matches.");
                return Ok(());
            }

            for (rank, hit) in results.iter().enumerate() {
                println!(
                    "{:>2}. [{:.4}] {} - {} ({}) {}",
                    rank + 1,
                    hit.similarity,
                    hit.title,
                    hit.author,
                    hit.discount_price,
                    hit.product_id
                );
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            if storage.path().exists() {
                let corpus = storage.load().await?;
                log::info!("Corpus: {} records at {:?}", corpus.len(), storage.path());
            } else {
                log::info!("No corpus found yet.");
            }
        }
    }

    Ok(())
}
