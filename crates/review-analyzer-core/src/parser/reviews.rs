//! Review listing parser for IMDb
//!
//! Each `<article>` on the listing page is one review block. A leading
//! "N / 10" token sequence is split off as the rating.

use scraper::{Html, Selector};

use crate::error::{AnalyzerError, Result};
use crate::parser::search::element_text;
use crate::types::{MAX_REVIEWS, NO_RATING, REVIEW_PROMPT_CHARS, Review, truncate_chars};

/// Parses a review listing page into at most [`MAX_REVIEWS`] reviews
///
/// # Arguments
/// * `html` - Raw HTML string from the `/title/{id}/reviews/` page
///
/// # Returns
/// Reviews in page order, bodies truncated to [`REVIEW_PROMPT_CHARS`]
///
/// # Errors
/// - `NotFound` if the page contains no review blocks
/// - `ParseError` if a selector cannot be built
pub fn parse_reviews(html: &str) -> Result<Vec<Review>> {
    let document = Html::parse_document(html);
    let article_selector = Selector::parse("article")
        .map_err(|e| AnalyzerError::ParseError(format!("Invalid selector: {:?}", e)))?;

    let reviews: Vec<Review> = document
        .select(&article_selector)
        .take(MAX_REVIEWS)
        .map(|article| parse_review_text(&element_text(&article)))
        .collect();

    if reviews.is_empty() {
        return Err(AnalyzerError::NotFound(
            "No reviews found for this title.".to_string(),
        ));
    }

    Ok(reviews)
}

/// Splits a review block's text into rating and body
///
/// The first three whitespace tokens are consumed as the rating when they
/// read `<number> / 10`; otherwise the rating is "No rating" and the text
/// is kept whole.
pub fn parse_review_text(text: &str) -> Review {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    match tokens.as_slice() {
        [score, "/", "10", rest @ ..] if is_score(score) => Review {
            rating: format!("{}/10", score),
            text: truncate_chars(&rest.join(" "), REVIEW_PROMPT_CHARS),
        },
        _ => Review {
            rating: NO_RATING.to_string(),
            text: truncate_chars(text, REVIEW_PROMPT_CHARS),
        },
    }
}

fn is_score(token: &str) -> bool {
    token.parse::<f32>().is_ok_and(|v| (0.0..=10.0).contains(&v))
}
