// src/models/mod.rs

//! Data structures shared across the harvester.

pub mod book;
pub mod config;
pub mod page_state;
pub mod stats;

pub use book::{BookRecord, NOT_AVAILABLE};
pub use config::{Config, CrawlerConfig, PublishConfig, StoreConfig};
pub use page_state::{PageState, event_target};
pub use stats::HarvestStats;
