//! URL helper functions for the IMDb catalog
//!
//! Provides functions for building search, title and review URLs,
//! and for pulling catalog identifiers out of links.

use std::sync::LazyLock;

use regex::Regex;

/// Public catalog origin
pub const BASE_URL: &str = "https://www.imdb.com";

static TITLE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/title/(tt\d+)/").expect("valid title href regex"));

static TITLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tt\d+$").expect("valid title id regex"));

/// Path of the title search page for a query
///
/// Restricts the search to titles of type feature film or TV.
///
/// # Example
/// ```
/// use review_analyzer_core::url::search_path;
/// assert_eq!(search_path("the matrix"), "/find/?q=the%20matrix&s=tt&ttype=ft,tv");
/// ```
pub fn search_path(query: &str) -> String {
    format!("/find/?q={}&s=tt&ttype=ft,tv", urlencoding::encode(query))
}

/// Path of a title's main page
pub fn title_path(id: &str) -> String {
    format!("/title/{}/", id)
}

/// Path of a title's user review listing
pub fn reviews_path(id: &str) -> String {
    format!("/title/{}/reviews/", id)
}

/// Extracts the catalog identifier from a title link
///
/// Accepts relative paths and absolute URLs, with or without query strings.
///
/// # Example
/// ```
/// use review_analyzer_core::url::extract_title_id;
/// let id = extract_title_id("/title/tt0133093/?ref_=fn_tt_tt_1");
/// assert_eq!(id, Some("tt0133093".to_string()));
/// ```
pub fn extract_title_id(href: &str) -> Option<String> {
    TITLE_HREF
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// True if `id` looks like a catalog identifier ("tt" followed by digits)
pub fn is_valid_title_id(id: &str) -> bool {
    TITLE_ID.is_match(id)
}
