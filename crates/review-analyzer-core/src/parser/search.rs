//! Search results parser for IMDb
//!
//! Parses HTML from the title search page and extracts candidate titles.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AnalyzerError, Result};
use crate::types::{MAX_SEARCH_RESULTS, MediaType, SearchResult};
use crate::url::extract_title_id;

static PAREN_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{4})\)").expect("valid year regex"));

static BARE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(18[7-9]\d|19\d{2}|20\d{2})\b").expect("valid bare year regex")
});

static POSTER_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_V1_.*?\.jpg").expect("valid poster size regex"));

/// Parses search results HTML and returns the candidate titles
///
/// Every anchor pointing at `/title/tt…/` is a candidate. Candidates are
/// deduplicated by identifier, keep page order, and are capped at
/// [`MAX_SEARCH_RESULTS`]. Poster URLs are only filled in when the
/// surrounding markup carries an image.
///
/// # Arguments
/// * `html` - Raw HTML string from the search results page
///
/// # Returns
/// Vector of `SearchResult` structs, empty if no results found
///
/// # Errors
/// Returns `ParseError` if a selector cannot be built
pub fn parse_search_results(html: &str) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    let link_selector = Selector::parse(r#"a[href*="/title/tt"]"#)
        .map_err(|e| AnalyzerError::ParseError(format!("Invalid selector: {:?}", e)))?;
    let img_selector = Selector::parse("img[src]")
        .map_err(|e| AnalyzerError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let mut results = Vec::new();
    let mut seen = HashSet::new();

    for link in document.select(&link_selector) {
        if results.len() >= MAX_SEARCH_RESULTS {
            break;
        }

        let Some(id) = link.value().attr("href").and_then(extract_title_id) else {
            continue;
        };
        if seen.contains(&id) {
            continue;
        }

        // Poster-only anchors carry no text; a later anchor for the same id usually does
        let title = element_text(&link);
        if title.chars().count() < 2 {
            continue;
        }
        seen.insert(id.clone());

        let container = enclosing_container(&link);
        let (year, media_type, poster_url) = match container {
            Some(container) => {
                let text = element_text(&container);
                (
                    extract_year(&text, &title),
                    detect_media_type(&text),
                    container
                        .select(&img_selector)
                        .next()
                        .and_then(|img| img.value().attr("src"))
                        .filter(|src| !src.trim().is_empty())
                        .map(upscale_poster_url),
                )
            }
            None => (None, MediaType::Movie, None),
        };

        results.push(SearchResult {
            id,
            title,
            year,
            media_type,
            poster_url,
        });
    }

    Ok(results)
}

/// Nearest ancestor `li` or `div` of a result link
fn enclosing_container<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| matches!(el.value().name(), "li" | "div"))
}

/// All text nodes of an element, trimmed and joined by single spaces
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds a release year in the container text
///
/// Prefers the "(2010)" form; otherwise takes the first plausible bare year
/// outside the title itself, so a title like "2012" is not read as its year.
fn extract_year(container_text: &str, title: &str) -> Option<String> {
    if let Some(caps) = PAREN_YEAR.captures(container_text) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    let rest = container_text.replacen(title, " ", 1);
    BARE_YEAR
        .captures(&rest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Infers the media type from labels in the container text
fn detect_media_type(container_text: &str) -> MediaType {
    if container_text.contains("TV Series") {
        MediaType::TvSeries
    } else if container_text.contains("TV Mini Series") {
        MediaType::MiniSeries
    } else {
        MediaType::Movie
    }
}

/// Rewrites the size suffix of a poster URL to request a 300px wide image
fn upscale_poster_url(src: &str) -> String {
    POSTER_SIZE.replace(src, "_V1_UX300.jpg").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_empty_html() {
        let html = "<html><body></body></html>";
        let results = parse_search_results(html).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_search_results_single_movie() {
        let html = r#"
        <html>
        <body>
        <ul>
            <li class="find-result-item">
                <img src="https://m.media-amazon.com/images/M/MV5BMj_V1_QL75_UX50_CR0,0,50,74_.jpg" alt="Inception">
                <a href="/title/tt1375666/?ref_=fn_tt_tt_1">Inception</a>
                <span>(2010)</span>
            </li>
        </ul>
        </body>
        </html>
        "#;

        let results = parse_search_results(html).unwrap();
        assert_eq!(results.len(), 1);

        let result = &results[0];
        assert_eq!(result.id, "tt1375666");
        assert_eq!(result.title, "Inception");
        assert_eq!(result.year, Some("2010".to_string()));
        assert_eq!(result.media_type, MediaType::Movie);
        assert_eq!(
            result.poster_url,
            Some("https://m.media-amazon.com/images/M/MV5BMj_V1_UX300.jpg".to_string())
        );
    }

    #[test]
    fn test_parse_search_results_series_types() {
        let html = r#"
        <html>
        <body>
            <li>
                <a href="/title/tt0903747/">Breaking Bad</a>
                <ul><li><span>2008–2013</span></li><li><span>TV Series</span></li></ul>
            </li>
            <li>
                <a href="/title/tt7366338/">Chernobyl</a>
                <span>2019</span> <span>TV Mini Series</span>
            </li>
        </body>
        </html>
        "#;

        let results = parse_search_results(html).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].title, "Breaking Bad");
        assert_eq!(results[0].media_type, MediaType::TvSeries);

        assert_eq!(results[1].title, "Chernobyl");
        assert_eq!(results[1].media_type, MediaType::MiniSeries);
        assert_eq!(results[1].year, Some("2019".to_string()));
    }

    #[test]
    fn test_poster_anchor_does_not_claim_id() {
        let html = r#"
        <html>
        <body>
            <div class="result">
                <a href="/title/tt0133093/"><img src="poster.jpg"></a>
                <a href="/title/tt0133093/">The Matrix</a>
                <span>1999</span>
            </div>
        </body>
        </html>
        "#;

        let results = parse_search_results(html).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Matrix");
        assert_eq!(results[0].year, Some("1999".to_string()));
        assert_eq!(results[0].poster_url, Some("poster.jpg".to_string()));
    }

    #[test]
    fn test_empty_img_src_is_no_poster() {
        let html = r#"<li><img src=""><a href="/title/tt0133093/">The Matrix</a> (1999)</li>"#;

        let results = parse_search_results(html).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].year, Some("1999".to_string()));
        assert_eq!(results[0].poster_url, None);
    }

    #[test]
    fn test_duplicate_ids_are_collapsed() {
        let html = r#"
        <html>
        <body>
            <div><a href="/title/tt0111161/">The Shawshank Redemption</a></div>
            <div><a href="/title/tt0111161/?ref_=dup">The Shawshank Redemption</a></div>
            <div><a href="/title/tt0068646/">The Godfather</a></div>
        </body>
        </html>
        "#;

        let results = parse_search_results(html).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["tt0111161", "tt0068646"]);
    }

    #[test]
    fn test_skip_links_without_title_text() {
        let html = r#"
        <html>
        <body>
            <a href="/title/tt0000001/">X</a>
            <a href="/name/nm0000138/">Leonardo DiCaprio</a>
            <a href="/title/tt0000002/">Real Title</a>
        </body>
        </html>
        "#;

        let results = parse_search_results(html).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "tt0000002");
        assert_eq!(results[0].year, None);
        assert_eq!(results[0].poster_url, None);
    }

    #[test]
    fn test_numeric_title_is_not_its_year() {
        let html = r#"
        <html><body>
            <div><a href="/title/tt1190080/">2012</a> <span>2009</span></div>
        </body></html>
        "#;

        let results = parse_search_results(html).unwrap();
        assert_eq!(results[0].title, "2012");
        assert_eq!(results[0].year, Some("2009".to_string()));
    }

    #[test]
    fn test_extract_year_prefers_parenthesized() {
        assert_eq!(extract_year("Alien 1979 (1986)", "Alien"), Some("1986".to_string()));
        assert_eq!(extract_year("no year here", "x"), None);
    }

    #[test]
    fn test_upscale_poster_url() {
        assert_eq!(
            upscale_poster_url("https://img/abc._V1_QL75_UY74_CR1,0,50,74_.jpg"),
            "https://img/abc._V1_UX300.jpg"
        );
        assert_eq!(upscale_poster_url("https://img/plain.png"), "https://img/plain.png");
    }

    fn page_with_ids(ids: &[u32]) -> String {
        let items: String = ids
            .iter()
            .map(|n| format!(r#"<li><a href="/title/tt{n:07}/">Title {n}</a></li>"#))
            .collect();
        format!("<html><body><ul>{}</ul></body></html>", items)
    }

    proptest! {
        #[test]
        fn prop_results_unique_and_capped(ids in proptest::collection::vec(0u32..40, 0..60)) {
            let html = page_with_ids(&ids);
            let results = parse_search_results(&html).unwrap();

            let unique: HashSet<u32> = ids.iter().copied().collect();
            prop_assert!(results.len() <= unique.len().min(MAX_SEARCH_RESULTS));

            let mut seen = HashSet::new();
            for result in &results {
                prop_assert!(seen.insert(result.id.clone()), "duplicate id {}", result.id);
            }
        }
    }
}
