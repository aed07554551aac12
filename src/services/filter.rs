// src/services/filter.rs

//! Validity filter rejecting non-book merchandise.
//!
//! The new-arrivals listing mixes books with card sets and gift packs. Those
//! are recognized by fixed substrings in the title or the detailed specs of
//! the source text (Traditional Chinese, matched case-sensitively).

/// Title substrings marking card-set products.
const TITLE_BLOCKLIST: &[&str] = &["盒卡", "金句"];

/// Detailed-specs substrings marking card or bulk gift-pack products.
const SPECS_BLOCKLIST: &[&str] = &["金句盒卡", "卡片", "福音卡片", "福音金句盒卡", "100張"];

/// Whether a record describes a genuine book.
///
/// Pure function: rejects when the title or the detailed specs contain any
/// blocklisted substring.
pub fn is_valid_book(title: &str, specs: &str) -> bool {
    if TITLE_BLOCKLIST.iter().any(|term| title.contains(term)) {
        return false;
    }
    if SPECS_BLOCKLIST.iter().any(|term| specs.contains(term)) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_card_set_by_title() {
        assert!(!is_valid_book("福音盒卡系列", "精美收藏盒，100張"));
        assert!(!is_valid_book("金句收藏", ""));
    }

    #[test]
    fn rejects_card_products_by_specs() {
        assert!(!is_valid_book("祝福小物", "福音金句盒卡一組"));
        assert!(!is_valid_book("祝福小物", "內含卡片"));
        assert!(!is_valid_book("祝福小物", "一盒100張"));
    }

    #[test]
    fn accepts_regular_books() {
        assert!(is_valid_book("靈修365", "平裝 / 384頁"));
        assert!(is_valid_book("耶穌的比喻", ""));
    }
}
