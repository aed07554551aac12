// src/search/index.rs

//! Tf-idf index over the corpus's searchable text.

use std::collections::HashMap;

use crate::models::BookRecord;
use crate::search::text::{ngrams, searchable_text, tokenize};

/// Vocabulary cap, most frequent features first.
pub const MAX_FEATURES: usize = 2000;

/// Features are word n-grams up to trigrams.
pub const MAX_NGRAM: usize = 3;

/// Features seen in fewer documents than this carry no ranking signal.
const MIN_DOC_FREQ: usize = 2;

/// Features seen in more than this share of documents are too common.
const MAX_DOC_RATIO: f64 = 0.95;

/// Immutable vector-space representation of a corpus.
///
/// One L2-normalized sparse tf-idf vector per record, in corpus order.
/// Rebuilt whenever the corpus changes; never mutated in place, so it can
/// be shared read-only across concurrent queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfidfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    doc_vectors: Vec<Vec<(usize, f64)>>,
}

impl TfidfIndex {
    /// Build an index over the corpus.
    ///
    /// Feature selection is deterministic: candidates are ranked by total
    /// corpus count with lexicographic tie-break before the cap applies.
    pub fn build(corpus: &[BookRecord]) -> Self {
        let doc_features: Vec<Vec<String>> = corpus
            .iter()
            .map(|record| ngrams(&tokenize(&searchable_text(record)), MAX_NGRAM))
            .collect();
        let n = doc_features.len();

        let doc_counts: Vec<HashMap<&str, usize>> = doc_features
            .iter()
            .map(|features| {
                let mut counts = HashMap::new();
                for feature in features {
                    *counts.entry(feature.as_str()).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        let mut corpus_count: HashMap<&str, usize> = HashMap::new();
        for counts in &doc_counts {
            for (&term, &count) in counts {
                *doc_freq.entry(term).or_insert(0) += 1;
                *corpus_count.entry(term).or_insert(0) += count;
            }
        }

        let max_doc_freq = MAX_DOC_RATIO * n as f64;
        let mut selected: Vec<&str> = doc_freq
            .iter()
            .filter(|&(_, &df)| df >= MIN_DOC_FREQ && (df as f64) <= max_doc_freq)
            .map(|(&term, _)| term)
            .collect();
        selected.sort_by(|a, b| corpus_count[b].cmp(&corpus_count[a]).then(a.cmp(b)));
        selected.truncate(MAX_FEATURES);
        selected.sort_unstable();

        let vocabulary: HashMap<String, usize> = selected
            .iter()
            .enumerate()
            .map(|(id, &term)| (term.to_string(), id))
            .collect();

        // Smoothed idf, as if one extra document contained every feature.
        let idf: Vec<f64> = selected
            .iter()
            .map(|&term| ((1 + n) as f64 / (1.0 + doc_freq[term] as f64)).ln() + 1.0)
            .collect();

        let doc_vectors = doc_counts
            .iter()
            .map(|counts| {
                let mut vector: Vec<(usize, f64)> = counts
                    .iter()
                    .filter_map(|(&term, &count)| {
                        vocabulary.get(term).map(|&id| (id, count as f64 * idf[id]))
                    })
                    .collect();
                vector.sort_by_key(|&(id, _)| id);
                l2_normalize(&mut vector);
                vector
            })
            .collect();

        Self {
            vocabulary,
            idf,
            doc_vectors,
        }
    }

    /// Number of indexed documents.
    pub fn doc_count(&self) -> usize {
        self.doc_vectors.len()
    }

    /// Number of selected vocabulary features.
    pub fn feature_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Project normalized query text into the index's vector space.
    pub fn project(&self, query: &str) -> Vec<(usize, f64)> {
        let tokens = tokenize(query);
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for feature in ngrams(&tokens, MAX_NGRAM) {
            if let Some(&id) = self.vocabulary.get(feature.as_str()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }

        let mut vector: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(id, count)| (id, count as f64 * self.idf[id]))
            .collect();
        vector.sort_by_key(|&(id, _)| id);
        l2_normalize(&mut vector);
        vector
    }

    /// Cosine similarity between a projected query and document `idx`.
    ///
    /// Both vectors are L2-normalized, so cosine reduces to a dot product.
    pub fn similarity(&self, query_vector: &[(usize, f64)], idx: usize) -> f64 {
        self.doc_vectors
            .get(idx)
            .map_or(0.0, |doc| sparse_dot(query_vector, doc))
    }
}

fn l2_normalize(vector: &mut [(usize, f64)]) {
    let norm = vector
        .iter()
        .map(|&(_, weight)| weight * weight)
        .sum::<f64>()
        .sqrt();
    if norm > 0.0 {
        for (_, weight) in vector.iter_mut() {
            *weight /= norm;
        }
    }
}

/// Dot product of two sparse vectors sorted by feature id.
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let mut sum = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (id_a, weight_a) = a[i];
        let (id_b, weight_b) = b[j];
        match id_a.cmp(&id_b) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += weight_a * weight_b;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::text::normalize;

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
    fn features_in_a_single_document_are_excluded() {
        let index = TfidfIndex::build(&sample_corpus());
        // "歷" appears only in record 003
        assert!(!index.vocabulary.contains_key("歷"));
        // "耶" appears in records 001 and 002
        assert!(index.vocabulary.contains_key("耶"));
    }

    #[test]
    fn shared_terms_score_against_matching_documents() {
        let corpus = sample_corpus();
        let index = TfidfIndex::build(&corpus);

        let query = index.project(&normalize("耶穌"));
        assert!(index.similarity(&query, 0) > 0.0);
        assert!(index.similarity(&query, 1) > 0.0);
        assert_eq!(index.similarity(&query, 2), 0.0);
    }

    #[test]
    fn out_of_vocabulary_query_projects_to_zero() {
        let index = TfidfIndex::build(&sample_corpus());
        let query = index.project(&normalize("xyzzy nonexistent"));
        assert!(query.is_empty());
    }

    #[test]
    fn rebuild_on_unchanged_corpus_is_identical() {
        let corpus = sample_corpus();
        assert_eq!(TfidfIndex::build(&corpus), TfidfIndex::build(&corpus));
    }

    #[test]
    fn empty_corpus_builds_an_empty_index() {
        let index = TfidfIndex::build(&[]);
        assert_eq!(index.doc_count(), 0);
        assert_eq!(index.feature_count(), 0);
    }

    #[test]
    fn document_vectors_are_unit_length() {
        let corpus = sample_corpus();
        let index = TfidfIndex::build(&corpus);
        for vector in &index.doc_vectors {
            if vector.is_empty() {
                continue;
            }
            let norm: f64 = vector.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }
}
