// src/services/detail.rs

//! Product detail scraper.
//!
//! Fetches one detail page per product id and extracts the named page
//! regions into a [`BookRecord`]. A missing region degrades to the `"N/A"`
//! sentinel; only a failed request drops the record.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{BookRecord, Config};
use crate::utils::http;

/// Scraper for product detail pages.
pub struct DetailScraper {
    config: Arc<Config>,
    client: Client,
}

impl DetailScraper {
    /// Create a new detail scraper with the given configuration and client.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    /// Fetch and parse the detail page for one product.
    ///
    /// A request error or non-success status fails the whole record; the
    /// caller logs and skips it, no retry happens here.
    pub async fn fetch(&self, product_id: &str) -> Result<BookRecord> {
        let url = format!(
            "{}?productID={}",
            self.config.store.detail_url, product_id
        );
        let body = http::fetch_text(&self.client, &url).await?;
        Ok(parse_detail(
            &body,
            product_id,
            &self.config.store.image_base_url,
        ))
    }

    /// Fetch details for many products with bounded concurrency.
    ///
    /// Results keep the input order; failures are logged and counted, and
    /// all requests complete before this returns (full-batch barrier).
    pub async fn fetch_all(&self, ids: &[String]) -> (Vec<BookRecord>, usize) {
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);
        let concurrency = self.config.crawler.max_concurrent.max(1);

        let mut records = Vec::with_capacity(ids.len());
        let mut failures = 0usize;

        let mut detail_stream = stream::iter(ids)
            .map(|id| async move { (id, self.fetch(id).await) })
            .buffered(concurrency);

        while let Some((id, result)) = detail_stream.next().await {
            match result {
                Ok(record) => records.push(record),
                Err(error) => {
                    failures += 1;
                    log::warn!("Failed to fetch product {}: {}", id, error);
                }
            }

            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        }

        (records, failures)
    }
}

/// Parse a detail page body into a record.
///
/// Pure over the response text so fixtures can exercise it offline. The
/// thumbnail URL is synthesized from the id, never scraped.
pub fn parse_detail(body: &str, product_id: &str, image_base_url: &str) -> BookRecord {
    let document = Html::parse_document(body);
    let mut record = BookRecord::new(product_id);

    if let Some(title) = inline_text(&document, "#MainContent_MainContent_lbProductName") {
        record.title = title;
    }
    if let Some(author) = inline_text(&document, "#MainContent_MainContent_lbAuthor") {
        record.author = author;
    }
    if let Some(publisher) = inline_text(&document, "#MainContent_MainContent_lbPublisher") {
        record.publisher = publisher;
    }
    if let Some(price) = inline_text(&document, "#MainContent_MainContent_lbListPrice0") {
        record.discount_price = price.clone();
        record.list_price = price;
    }
    if let Some(mut stock) = inline_text(&document, "#MainContent_MainContent_lbQTY") {
        if let Some(note) = inline_text(&document, "#MainContent_MainContent_lbNormalQty") {
            stock.push(' ');
            stock.push_str(&note);
        }
        record.stock = stock;
    }
    if let Some(intro) = block_text(
        &document,
        "#MainContent_MainContent_divDescriptionBlock .heightlimit_des",
    ) {
        record.content_intro = intro;
    }
    if let Some(author_intro) = block_text(
        &document,
        "#MainContent_MainContent_divAuthorIntroBlock .heightlimit_aut",
    ) {
        record.author_intro = author_intro;
    }
    if let Some(toc) = block_text(
        &document,
        "#MainContent_MainContent_divContentBlock .heightlimit_con",
    ) {
        record.table_of_contents = toc;
    }
    if let Some(specs) = block_text(&document, "#MainContent_MainContent_divDetailDesc .infomore") {
        record.detailed_specs = specs;
    }

    record.image_url = format!("{image_base_url}/{product_id}_01_180_250.jpg");
    record
}

/// Text of the first element matching `selector`, fragments concatenated.
fn inline_text(document: &Html, selector: &str) -> Option<String> {
    let element = select_first(document, selector)?;
    let text: String = element.text().map(str::trim).collect();
    if text.is_empty() { None } else { Some(text) }
}

/// Text of the first element matching `selector`, one line per text node.
fn block_text(document: &Html, selector: &str) -> Option<String> {
    let element = select_first(document, selector)?;
    let lines: Vec<&str> = element
        .text()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    // Selectors here are compile-time literals; a parse failure is a bug.
    let parsed = Selector::parse(selector).ok()?;
    document.select(&parsed).next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;

    const DETAIL_FIXTURE: &str = r#"
        <html><body>
        <span id="MainContent_MainContent_lbProductName">靈修365</span>
        <span id="MainContent_MainContent_lbAuthor">王大明</span>
        <span id="MainContent_MainContent_lbPublisher">校園書房</span>
        <span id="MainContent_MainContent_lbListPrice0">NT$350</span>
        <span id="MainContent_MainContent_lbQTY">12</span>
        <span id="MainContent_MainContent_lbNormalQty">現貨供應</span>
        <div id="MainContent_MainContent_divDescriptionBlock">
            <div class="heightlimit_des">
                <p>每天十分鐘，</p>
                <p>與耶穌同行。</p>
            </div>
        </div>
        <div id="MainContent_MainContent_divDetailDesc">
            <div class="infomore">平裝 / 384頁</div>
        </div>
        </body></html>"#;

    #[test]
    fn parses_named_regions() {
        let record = parse_detail(DETAIL_FIXTURE, "0010001", "https://example.com/thumbs");
        assert_eq!(record.title, "靈修365");
        assert_eq!(record.author, "王大明");
        assert_eq!(record.publisher, "校園書房");
        assert_eq!(record.list_price, "NT$350");
        assert_eq!(record.discount_price, "NT$350");
        assert_eq!(record.stock, "12 現貨供應");
        assert_eq!(record.content_intro, "每天十分鐘，\n與耶穌同行。");
        assert_eq!(record.detailed_specs, "平裝 / 384頁");
    }

    #[test]
    fn missing_regions_become_sentinels() {
        let record = parse_detail(DETAIL_FIXTURE, "0010001", "https://example.com/thumbs");
        assert_eq!(record.author_intro, NOT_AVAILABLE);
        assert_eq!(record.table_of_contents, NOT_AVAILABLE);
        assert_eq!(record.book_features, NOT_AVAILABLE);
    }

    #[test]
    fn empty_page_yields_all_sentinels_except_image() {
        let record = parse_detail("<html></html>", "A9", "https://example.com/thumbs");
        assert_eq!(record.title, NOT_AVAILABLE);
        assert_eq!(record.stock, NOT_AVAILABLE);
        assert_eq!(record.image_url, "https://example.com/thumbs/A9_01_180_250.jpg");
    }

    #[test]
    fn image_url_is_synthesized_from_the_id() {
        let record = parse_detail(DETAIL_FIXTURE, "0010001", "https://shop.example/Images/thumbs");
        assert_eq!(
            record.image_url,
            "https://shop.example/Images/thumbs/0010001_01_180_250.jpg"
        );
    }
}
