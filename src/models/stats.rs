// src/models/stats.rs

//! Statistics describing one harvest run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a completed harvest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestStats {
    /// Run start time
    pub start_time: DateTime<Utc>,
    /// Run end time
    pub end_time: DateTime<Utc>,
    /// Listing pages parsed successfully
    pub pages_parsed: usize,
    /// Distinct product identifiers discovered
    pub ids_discovered: usize,
    /// Detail pages fetched successfully
    pub details_fetched: usize,
    /// Detail pages that failed and were skipped
    pub detail_failures: usize,
    /// Records rejected as non-book merchandise
    pub rejected: usize,
    /// Records newly added to the corpus by the merge
    pub merged_in: usize,
    /// Corpus size after the merge
    pub corpus_size: usize,
}
