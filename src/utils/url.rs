// src/utils/url.rs

//! URL helpers for product links.

/// Query parameter naming a product on detail-page links.
const PRODUCT_ID_PARAM: &str = "productID=";

/// Extract the product identifier from a detail-page href.
///
/// Returns `None` when the link does not carry a `productID` parameter or
/// the parameter is empty.
pub fn product_id_from_href(href: &str) -> Option<String> {
    let (_, rest) = href.split_once(PRODUCT_ID_PARAM)?;
    let id = rest.split('&').next().unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_plain_id() {
        assert_eq!(
            product_id_from_href("ProductDetails.aspx?productID=0010001"),
            Some("0010001".to_string())
        );
    }

    #[test]
    fn cuts_trailing_parameters() {
        assert_eq!(
            product_id_from_href("/ProductDetails.aspx?productID=A123&ref=new"),
            Some("A123".to_string())
        );
    }

    #[test]
    fn rejects_links_without_product_id() {
        assert_eq!(product_id_from_href("/IsNewBook.aspx?page=2"), None);
        assert_eq!(product_id_from_href("ProductDetails.aspx?productID="), None);
    }
}
