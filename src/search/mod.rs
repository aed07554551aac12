// src/search/mod.rs

//! Text search over the harvested corpus.
//!
//! A vector-space model: each record's searchable text is turned into an
//! L2-normalized tf-idf vector over word n-gram features, queries are
//! projected into the same space and ranked by cosine similarity, with a
//! keyword-containment fallback when the query shares no features with the
//! index vocabulary.

pub mod index;
pub mod query;
pub mod text;

pub use index::TfidfIndex;
pub use query::{SearchResult, search};
