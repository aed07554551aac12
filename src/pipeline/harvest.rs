// src/pipeline/harvest.rs

//! Harvest pipeline.
//!
//! One batch run: crawl the paginated listing for product ids, fetch detail
//! pages with bounded concurrency, filter out non-book merchandise, merge
//! into the persisted corpus and optionally publish it.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, HarvestStats};
use crate::pipeline::merge_corpus;
use crate::services::{DetailScraper, ListingCrawler, is_valid_book};
use crate::storage::{CorpusStore, HubPublisher};
use crate::utils::http;

/// Run one harvest: crawl, extract, filter, merge, persist, publish.
///
/// Per-item failures are logged and skipped. Only a failed first listing
/// page or a failed corpus write aborts the run; a failed publication is
/// logged and absorbed because the local corpus is already durable.
pub async fn run_harvest(
    config: Arc<Config>,
    store: &dyn CorpusStore,
    publisher: Option<&HubPublisher>,
) -> Result<HarvestStats> {
    let start_time = Utc::now();
    let client = http::create_client(&config.crawler)?;
    let max_pages = config.crawler.max_pages;

    log::info!("Crawling new-arrivals listing (up to {} pages)", max_pages);
    let crawler = ListingCrawler::new(Arc::clone(&config), client.clone());
    let listing = crawler.crawl(max_pages).await?;
    log::info!(
        "Discovered {} product ids across {} pages",
        listing.ids.len(),
        listing.pages_parsed
    );

    let scraper = DetailScraper::new(Arc::clone(&config), client);
    let (records, detail_failures) = scraper.fetch_all(&listing.ids).await;
    let details_fetched = records.len();

    let accepted: Vec<_> = records
        .into_iter()
        .filter(|record| {
            let keep = is_valid_book(&record.title, &record.detailed_specs);
            if !keep {
                log::info!("Rejected non-book product {}: {}", record.product_id, record.title);
            }
            keep
        })
        .collect();
    let rejected = details_fetched - accepted.len();

    let existing = store.load().await?;
    let existing_count = existing.len();
    let merged = merge_corpus(existing, accepted);
    let corpus_size = merged.len();
    let merged_in = corpus_size - existing_count;

    // Persistence failure is fatal; the store keeps the previous file intact.
    store.save(&merged).await?;

    if let Some(publisher) = publisher {
        let bytes = serde_json::to_vec_pretty(&merged)?;
        if let Err(error) = publisher.publish(&bytes).await {
            log::warn!("Corpus publication failed (local corpus unaffected): {}", error);
        }
    }

    let stats = HarvestStats {
        start_time,
        end_time: Utc::now(),
        pages_parsed: listing.pages_parsed,
        ids_discovered: listing.ids.len(),
        details_fetched,
        detail_failures,
        rejected,
        merged_in,
        corpus_size,
    };

    log::info!(
        "Harvest complete: {} pages, {} ids, {} fetched ({} failed), {} rejected, {} new, corpus now {}",
        stats.pages_parsed,
        stats.ids_discovered,
        stats.details_fetched,
        stats.detail_failures,
        stats.rejected,
        stats.merged_in,
        stats.corpus_size
    );

    Ok(stats)
}
