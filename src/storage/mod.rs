// src/storage/mod.rs

//! Storage abstractions for corpus persistence.
//!
//! The corpus file is the sole contract between harvest runs and the search
//! engine: a pretty-printed UTF-8 JSON array of [`BookRecord`]s with
//! non-ASCII text preserved literally.

pub mod hub;
pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::BookRecord;

// Re-export for convenience
pub use hub::HubPublisher;
pub use local::LocalStorage;

/// Trait for corpus storage backends.
///
/// Writers must be serialized (the harvest pipeline is the only writer);
/// readers may load the last fully-written corpus at any time.
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Load the persisted corpus, or an empty one if none exists yet.
    async fn load(&self) -> Result<Vec<BookRecord>>;

    /// Replace the persisted corpus atomically.
    ///
    /// A failed save must leave the previously persisted corpus intact.
    async fn save(&self, records: &[BookRecord]) -> Result<()>;
}
