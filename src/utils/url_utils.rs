//! Search URL helpers.
//!
//! Dictionary links point at the search page with the query in the `q`
//! parameter, spaces written as `+`.
//!
//! # Examples
//!
//! ```
//! use qawhaq::utils::url_utils::{decode_search_href, search_href};
//!
//! let href = search_href("Qapla' batlh");
//! assert_eq!(href, "?q=Qapla'+batlh");
//! assert_eq!(decode_search_href(&href)?, "Qapla' batlh");
//! # Ok::<(), qawhaq::LexiconError>(())
//! ```

use percent_encoding::percent_decode_str;
use url::Url;

use crate::{LexiconError, Result};

/// Name of the query parameter of the search page.
pub const QUERY_PARAMETER: &str = "q";

/// Relative link to the search results for `query`.
pub fn search_href(query: &str) -> String {
    format!("?{}={}", QUERY_PARAMETER, query.replace(' ', "+"))
}

/// Absolute search URL on `base`, with the query form-encoded.
pub fn search_url(base: &Url, query: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().clear().append_pair(QUERY_PARAMETER, query);
    url
}

/// Extracts the query from a search link produced by [`search_href`] or
/// [`search_url`]. `+` is read as a space and percent escapes are decoded.
///
/// # Errors
///
/// Returns [`LexiconError::InvalidParameter`] if the link has no `q`
/// parameter and [`LexiconError::InvalidDataFormat`] if the decoded query is
/// not valid UTF-8.
pub fn decode_search_href(href: &str) -> Result<String> {
    let query_string = match href.split_once('?') {
        Some((_, query_string)) => query_string,
        None => href,
    };
    let query_string = query_string.split('#').next().unwrap_or("");
    for pair in query_string.split('&') {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        if name == QUERY_PARAMETER {
            let value = value.replace('+', " ");
            let decoded = percent_decode_str(&value).decode_utf8()?;
            return Ok(decoded.to_string());
        }
    }
    Err(LexiconError::invalid_parameter(format!(
        "search link without a query: {}",
        href
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_href() -> Result<()> {
        let test_cases = [
            ("?q=Soj", "Soj"),
            ("?q=tlh:\"^Soj$\"+pos:n+pos:1", "tlh:\"^Soj$\" pos:n pos:1"),
            ("https://example.org/?lang=de&q=Qapla%27+batlh#top", "Qapla' batlh"),
            ("q=%C3%A4", "ä"),
        ];
        for (href, expected) in test_cases {
            assert_eq!(decode_search_href(href)?, expected, "decode {:?}", href);
        }
        Ok(())
    }

    #[test]
    fn test_missing_query() {
        assert!(decode_search_href("?lang=de").is_err());
        assert!(decode_search_href("?q=%FF").is_err());
    }

    #[test]
    fn test_search_url_round_trip() -> Result<()> {
        let base = Url::parse("https://example.org/search?old=1")
            .map_err(|e| LexiconError::invalid_parameter(e.to_string()))?;
        let url = search_url(&base, "tlh:\"^Qapla'$\" & more");
        assert_eq!(decode_search_href(url.as_str())?, "tlh:\"^Qapla'$\" & more");
        Ok(())
    }
}
