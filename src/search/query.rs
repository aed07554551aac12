// src/search/query.rs

//! Query ranking over the tf-idf index.

use serde::Serialize;

use crate::models::BookRecord;
use crate::search::TfidfIndex;
use crate::search::text::{normalize, searchable_text};

/// One ranked hit: a read-only projection of a corpus record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchResult {
    pub product_id: String,
    pub title: String,
    pub author: String,
    pub discount_price: String,
    /// Cosine similarity in `0.0..=1.0`, or a binary keyword score when the
    /// vector signal was degenerate.
    pub similarity: f64,
}

/// Rank the corpus against a free-text query.
///
/// Scores are cosine similarities; when the best similarity over the whole
/// corpus is exactly zero (the query shares no features with the index
/// vocabulary) the ranking falls back to binary containment of the
/// normalized query in each record's searchable text. Either way the result
/// is sorted by descending score, ties keeping corpus order, truncated to
/// `top_n`.
pub fn search(
    corpus: &[BookRecord],
    index: &TfidfIndex,
    query: &str,
    top_n: usize,
) -> Vec<SearchResult> {
    if corpus.is_empty() {
        return Vec::new();
    }

    let normalized = normalize(query);
    let query_vector = index.project(&normalized);
    let mut scores: Vec<f64> = (0..corpus.len())
        .map(|idx| index.similarity(&query_vector, idx))
        .collect();

    let best = scores.iter().cloned().fold(0.0, f64::max);
    if best == 0.0 {
        log::debug!("Zero similarity across corpus, using keyword fallback");
        scores = corpus
            .iter()
            .map(|record| {
                let haystack = searchable_text(record).to_lowercase();
                if haystack.contains(&normalized) { 1.0 } else { 0.0 }
            })
            .collect();
    }

    let mut order: Vec<usize> = (0..corpus.len()).collect();
    // Stable sort: equal scores keep their corpus order.
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    order
        .into_iter()
        .take(top_n)
        .map(|idx| {
            let record = &corpus[idx];
            SearchResult {
                product_id: record.product_id.clone(),
                title: record.title.clone(),
                author: record.author.clone(),
                discount_price: record.discount_price.clone(),
                similarity: scores[idx],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, intro: &str) -> BookRecord {
        let mut record = BookRecord::new(id);
        record.title = title.to_string();
        record.content_intro = intro.to_string();
        record
    }

    fn sample_corpus() -> Vec<BookRecord> {
        vec![
            record("001", "認識耶穌", "一本認識耶穌的入門書"),
            record("002", "跟隨耶穌", "跟隨耶穌每一天"),
            record("003", "教會歷史", "兩千年教會發展"),
        ]
    }

    #[test]
    fn matching_records_outrank_non_matching_ones() {
        let corpus = sample_corpus();
        let index = TfidfIndex::build(&corpus);

        let results = search(&corpus, &index, "耶穌", 5);

        assert_eq!(results.len(), 3);
        let last = &results[2];
        assert_eq!(last.product_id, "003");
        assert!(results[0].similarity > last.similarity);
        assert!(results[0].similarity >= results[1].similarity);
        assert_eq!(last.similarity, 0.0);
    }

    #[test]
    fn out_of_vocabulary_query_falls_back_to_keyword_matching() {
        let mut corpus = sample_corpus();
        // Substring present in exactly one record, but in no index feature
        // (it appears in a single document only).
        corpus[2].content_intro = "關於xyzzy nonexistent的研究".to_string();
        let index = TfidfIndex::build(&corpus);

        let results = search(&corpus, &index, "xyzzy-nonexistent", 5);

        assert_eq!(results[0].product_id, "003");
        assert_eq!(results[0].similarity, 1.0);
        assert_eq!(results[1].similarity, 0.0);
        assert_eq!(results[2].similarity, 0.0);
    }

    #[test]
    fn fallback_scores_all_zero_when_nothing_contains_the_query() {
        let corpus = sample_corpus();
        let index = TfidfIndex::build(&corpus);

        let results = search(&corpus, &index, "xyzzy-nonexistent", 5);

        assert!(results.iter().all(|r| r.similarity == 0.0));
        // Ties keep corpus order.
        let ids: Vec<&str> = results.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["001", "002", "003"]);
    }

    #[test]
    fn results_are_truncated_to_top_n() {
        let corpus = sample_corpus();
        let index = TfidfIndex::build(&corpus);
        assert_eq!(search(&corpus, &index, "耶穌", 2).len(), 2);
    }

    #[test]
    fn empty_corpus_returns_no_results() {
        let corpus: Vec<BookRecord> = Vec::new();
        let index = TfidfIndex::build(&corpus);
        assert!(search(&corpus, &index, "耶穌", 5).is_empty());
    }

    #[test]
    fn repeated_search_is_deterministic() {
        let corpus = sample_corpus();

        let first = search(&corpus, &TfidfIndex::build(&corpus), "耶穌", 5);
        let second = search(&corpus, &TfidfIndex::build(&corpus), "耶穌", 5);

        assert_eq!(first, second);
    }
}
