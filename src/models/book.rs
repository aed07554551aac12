// src/models/book.rs

//! Book record data structure.

use serde::{Deserialize, Serialize};

/// Sentinel for a field that could not be extracted from the product page.
///
/// The persisted JSON contract uses this literal string rather than omitting
/// the field, so every record always carries the full schema.
pub const NOT_AVAILABLE: &str = "N/A";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// A single harvested product record.
///
/// `product_id` is the unique key within the corpus; every other field
/// defaults to [`NOT_AVAILABLE`] when the source page lacks the region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookRecord {
    /// Storefront product identifier (unique corpus key)
    pub product_id: String,

    /// Book title
    #[serde(default = "not_available")]
    pub title: String,

    /// Author name(s)
    #[serde(default = "not_available")]
    pub author: String,

    /// Publisher name
    #[serde(default = "not_available")]
    pub publisher: String,

    /// List price as displayed on the page
    #[serde(default = "not_available")]
    pub list_price: String,

    /// Discounted price (mirrors the list price at extraction time)
    #[serde(default = "not_available")]
    pub discount_price: String,

    /// Stock description, quantity plus availability note
    #[serde(default = "not_available")]
    pub stock: String,

    /// Content introduction block
    #[serde(default = "not_available")]
    pub content_intro: String,

    /// Book features block (no source region on the current page layout)
    #[serde(default = "not_available")]
    pub book_features: String,

    /// Author introduction block
    #[serde(default = "not_available")]
    pub author_intro: String,

    /// Table of contents block
    #[serde(default = "not_available")]
    pub table_of_contents: String,

    /// Detailed specifications block
    #[serde(default = "not_available")]
    pub detailed_specs: String,

    /// Thumbnail URL, synthesized from the product identifier
    #[serde(default = "not_available")]
    pub image_url: String,
}

impl BookRecord {
    /// Create a record for the given identifier with every field set to the
    /// sentinel value.
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            title: not_available(),
            author: not_available(),
            publisher: not_available(),
            list_price: not_available(),
            discount_price: not_available(),
            stock: not_available(),
            content_intro: not_available(),
            book_features: not_available(),
            author_intro: not_available(),
            table_of_contents: not_available(),
            detailed_specs: not_available(),
            image_url: not_available(),
        }
    }
}
