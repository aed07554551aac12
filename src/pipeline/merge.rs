// src/pipeline/merge.rs

//! Corpus merge logic.

use std::collections::HashSet;

use crate::models::BookRecord;

/// Merge newly harvested records into the existing corpus.
///
/// Existing records keep their position and are never overwritten (first
/// write wins); new records whose identifier is unseen are appended in
/// input order. Running the merge twice with the same input is a no-op the
/// second time.
pub fn merge_corpus(existing: Vec<BookRecord>, new_records: Vec<BookRecord>) -> Vec<BookRecord> {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|record| record.product_id.clone())
        .collect();

    let mut merged = existing;
    for record in new_records {
        if seen.insert(record.product_id.clone()) {
            merged.push(record);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, title: &str) -> BookRecord {
        let mut record = BookRecord::new(id);
        record.title = title.to_string();
        record
    }

    #[test]
    fn appends_only_unseen_identifiers() {
        let existing = vec![sample("001", "old"), sample("002", "old")];
        let incoming = vec![sample("002", "new"), sample("003", "new")];

        let merged = merge_corpus(existing, incoming);

        let ids: Vec<&str> = merged.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["001", "002", "003"]);
    }

    #[test]
    fn existing_records_are_never_overwritten() {
        let existing = vec![sample("001", "first harvest")];
        let incoming = vec![sample("001", "second harvest")];

        let merged = merge_corpus(existing, incoming);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "first harvest");
    }

    #[test]
    fn identifiers_stay_unique_within_the_corpus() {
        let incoming = vec![sample("001", "a"), sample("001", "b"), sample("002", "c")];
        let merged = merge_corpus(Vec::new(), incoming);

        let mut ids: Vec<&str> = merged.iter().map(|r| r.product_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), merged.len());
    }

    #[test]
    fn merge_is_idempotent() {
        let incoming = vec![sample("001", "a"), sample("002", "b")];

        let once = merge_corpus(Vec::new(), incoming.clone());
        let twice = merge_corpus(once.clone(), incoming);

        assert_eq!(once, twice);
    }

    #[test]
    fn preserves_relative_order_of_new_records() {
        let incoming = vec![sample("005", "e"), sample("003", "c"), sample("004", "d")];
        let merged = merge_corpus(vec![sample("001", "a")], incoming);

        let ids: Vec<&str> = merged.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["001", "005", "003", "004"]);
    }
}
