// src/pipeline/mod.rs

//! Pipeline entry points for harvester operations.
//!
//! - `run_harvest`: crawl the listing, fetch details, merge and persist
//! - `merge_corpus`: dedup-merge newly harvested records into the corpus

pub mod harvest;
pub mod merge;

pub use harvest::run_harvest;
pub use merge::merge_corpus;
