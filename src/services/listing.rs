// src/services/listing.rs

//! New-arrivals listing crawler.
//!
//! The listing is a server-paginated WebForms page: page 1 is a plain GET,
//! every later page is a POST echoing the hidden state tokens from the
//! previous response (see [`crate::models::page_state`]). Each request
//! therefore depends on the response before it, so pages are walked strictly
//! sequentially by a single worker: one GET, then at most `max_pages - 1`
//! POSTs per run.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Config, PageState, event_target, page_state};
use crate::utils::{http, product_id_from_href};

/// Anchor links pointing at a product detail page.
const PRODUCT_LINK_SELECTOR: &str = r#"a[href*="ProductDetails.aspx?productID="]"#;

/// Summary of a listing crawl.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Product identifiers in discovery order, each kept exactly once
    pub ids: Vec<String>,
    /// Listing pages whose response was parsed successfully
    pub pages_parsed: usize,
}

/// Transport for listing pages.
///
/// One call per page request, no retries; the crawl loop owns the failure
/// policy.
#[async_trait]
trait PageFetcher {
    /// GET the first listing page.
    async fn fetch_first(&self, url: &str) -> Result<String>;

    /// POST the postback form requesting the given page.
    async fn fetch_next(&self, url: &str, page: usize, state: &PageState) -> Result<String>;
}

/// Crawler for the paginated new-arrivals listing.
pub struct ListingCrawler {
    config: Arc<Config>,
    client: Client,
}

impl ListingCrawler {
    /// Create a new listing crawler with the given configuration and client.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    /// Walk up to `max_pages` listing pages and collect product identifiers
    /// in discovery order, each kept exactly once.
    ///
    /// A failed first page aborts the run; later page failures are skipped
    /// unless `max_consecutive_failures` of them occur in a row. A page that
    /// yields no new identifiers is benign (there is no last-page signal).
    pub async fn crawl(&self, max_pages: usize) -> Result<CrawlOutcome> {
        crawl_with(self, &self.config, max_pages).await
    }
}

#[async_trait]
impl PageFetcher for ListingCrawler {
    async fn fetch_first(&self, url: &str) -> Result<String> {
        http::fetch_text(&self.client, url).await
    }

    async fn fetch_next(&self, url: &str, page: usize, state: &PageState) -> Result<String> {
        let fields = state.form_fields(&event_target(page));
        let text = self
            .client
            .post(url)
            .header(reqwest::header::REFERER, url)
            .form(&fields)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

/// Sequential crawl loop over any page transport.
async fn crawl_with<F>(fetcher: &F, config: &Config, max_pages: usize) -> Result<CrawlOutcome>
where
    F: PageFetcher + Sync + ?Sized,
{
    let url = &config.store.listing_url;
    let delay = Duration::from_millis(config.crawler.request_delay_ms);

    let first = fetcher
        .fetch_first(url)
        .await
        .map_err(|e| AppError::crawl(format!("listing page 1 ({url})"), e))?;

    let mut outcome = CrawlOutcome::default();
    let mut seen = HashSet::new();
    let mut state = collect_page(&first, &mut seen, &mut outcome.ids)?;
    outcome.pages_parsed = 1;
    log::info!("Listing page 1: {} product ids", outcome.ids.len());

    let mut consecutive_failures = 0usize;
    for page in 2..=max_pages {
        if delay.as_millis() > 0 {
            tokio::time::sleep(delay).await;
        }

        match fetcher.fetch_next(url, page, &state).await {
            Ok(body) => {
                let before = outcome.ids.len();
                state = collect_page(&body, &mut seen, &mut outcome.ids)?;
                outcome.pages_parsed += 1;
                consecutive_failures = 0;
                log::info!(
                    "Listing page {}: {} new product ids",
                    page,
                    outcome.ids.len() - before
                );
            }
            Err(error) => {
                consecutive_failures += 1;
                log::warn!("Failed to fetch listing page {}: {}", page, error);
                if consecutive_failures >= config.crawler.max_consecutive_failures {
                    return Err(AppError::crawl(
                        format!("listing page {page}"),
                        format!("{consecutive_failures} consecutive page failures"),
                    ));
                }
            }
        }
    }

    Ok(outcome)
}

/// Parse one listing response: merge its product ids into the running set
/// and return the refreshed page state for the next request.
fn collect_page(body: &str, seen: &mut HashSet<String>, ids: &mut Vec<String>) -> Result<PageState> {
    let document = Html::parse_document(body);
    for id in extract_ids(&document)? {
        if seen.insert(id.clone()) {
            ids.push(id);
        }
    }
    Ok(extract_page_state(&document))
}

/// Extract product identifiers from detail-page anchors, in document order.
fn extract_ids(document: &Html) -> Result<Vec<String>> {
    let selector = parse_selector(PRODUCT_LINK_SELECTOR)?;
    let mut found = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if let Some(id) = product_id_from_href(href) {
            if !found.contains(&id) {
                found.push(id);
            }
        }
    }
    Ok(found)
}

/// Extract the hidden protocol tokens; a missing field is an empty string.
fn extract_page_state(document: &Html) -> PageState {
    PageState {
        view_state: hidden_field(document, page_state::VIEW_STATE),
        event_validation: hidden_field(document, page_state::EVENT_VALIDATION),
        view_state_generator: hidden_field(document, page_state::VIEW_STATE_GENERATOR),
        previous_page: hidden_field(document, page_state::PREVIOUS_PAGE),
    }
}

fn hidden_field(document: &Html, name: &str) -> String {
    let raw = format!(r#"input[name="{name}"]"#);
    let Ok(selector) = Selector::parse(&raw) else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .unwrap_or("")
        .to_string()
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
