// src/search/text.rs

//! Text normalization and tokenization for indexing and queries.

use std::sync::OnceLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{BookRecord, NOT_AVAILABLE};

static PUNCTUATION: OnceLock<Regex> = OnceLock::new();

/// Lowercase and replace punctuation with whitespace.
pub fn normalize(text: &str) -> String {
    let punctuation =
        PUNCTUATION.get_or_init(|| Regex::new(r"[^\w\s]").expect("static regex is valid"));
    punctuation
        .replace_all(&text.to_lowercase(), " ")
        .into_owned()
}

/// Split normalized text into word tokens.
///
/// Unicode word segmentation needs no dictionary for the source language:
/// each CJK ideograph becomes its own token, so n-grams recover phrases.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .unicode_words()
        .map(String::from)
        .collect()
}

/// All word n-grams of length 1..=`max_n`, joined by a space.
pub fn ngrams(tokens: &[String], max_n: usize) -> Vec<String> {
    let mut features = Vec::new();
    for n in 1..=max_n {
        for window in tokens.windows(n) {
            features.push(window.join(" "));
        }
    }
    features
}

/// The text a record is searched by: title, author and introduction.
///
/// Sentinel fields count as empty rather than contributing the literal
/// `"N/A"` to the index.
pub fn searchable_text(record: &BookRecord) -> String {
    [&record.title, &record.author, &record.content_intro]
        .iter()
        .map(|field| {
            if field.as_str() == NOT_AVAILABLE {
                ""
            } else {
                field.as_str()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello  world ");
        assert_eq!(normalize("xyzzy-nonexistent"), "xyzzy nonexistent");
    }

    #[test]
    fn tokenize_splits_cjk_per_ideograph() {
        assert_eq!(tokenize("耶穌"), vec!["耶", "穌"]);
        assert_eq!(tokenize("靈修365"), vec!["靈", "修", "365"]);
    }

    #[test]
    fn ngrams_cover_unigrams_through_trigrams() {
        let tokens: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let features = ngrams(&tokens, 3);
        assert_eq!(features, vec!["a", "b", "c", "a b", "b c", "a b c"]);
    }

    #[test]
    fn searchable_text_treats_sentinels_as_empty() {
        let mut record = BookRecord::new("001");
        record.title = "靈修365".to_string();
        // author and content_intro stay "N/A"
        assert_eq!(searchable_text(&record), "靈修365  ");
    }
}
