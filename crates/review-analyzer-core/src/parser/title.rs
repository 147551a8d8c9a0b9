//! Title page parser for IMDb
//!
//! Only the poster is read from title pages; it backs up search results
//! whose markup carried no image.

use scraper::{Html, Selector};

/// Extracts a poster image URL from a title page
///
/// Tries, in order: an `<img>` whose class mentions "poster", an `<img>`
/// whose `data-testid` mentions "poster", and the `og:image` meta tag.
pub fn parse_poster_url(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let img_selector = Selector::parse("img").ok()?;
    for attr in ["class", "data-testid"] {
        let poster = document
            .select(&img_selector)
            .find(|img| {
                img.value()
                    .attr(attr)
                    .is_some_and(|v| v.to_lowercase().contains("poster"))
            })
            .and_then(|img| img.value().attr("src"))
            .filter(|src| !src.is_empty());

        if let Some(src) = poster {
            return Some(src.to_string());
        }
    }

    let meta_selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;
    document
        .select(&meta_selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}
