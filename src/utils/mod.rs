// src/utils/mod.rs

//! Shared utility helpers.

pub mod http;
pub mod url;

pub use url::product_id_from_href;
