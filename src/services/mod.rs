// src/services/mod.rs

//! Services for talking to the storefront.

pub mod detail;
pub mod filter;
pub mod listing;

pub use detail::DetailScraper;
pub use filter::is_valid_book;
pub use listing::{CrawlOutcome, ListingCrawler};
