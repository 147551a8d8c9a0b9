//! Prompt assembly for the summarizer

use crate::types::{MAX_REVIEWS, REVIEW_PROMPT_CHARS, Review, truncate_chars};

const INSTRUCTIONS: &str = "Based on the following movie reviews, provide:
1. A brief summary of the overall sentiment and key points from the reviews
2. A one-line recommendation on whether to watch the movie or not
3. At the end, provide a rating out of 100 based on the sentiment and ratings in these reviews (format: \"Overall Rating: X/100\")";

const CLOSING: &str = "Please provide your analysis.";

/// Formats one review as a "Rating/Review" pair
pub fn format_review(review: &Review) -> String {
    format!(
        "Rating: {}\nReview: {}",
        review.rating,
        truncate_chars(&review.text, REVIEW_PROMPT_CHARS)
    )
}

/// Builds the single-turn prompt for up to [`MAX_REVIEWS`] reviews
pub fn build_prompt(reviews: &[Review]) -> String {
    let combined = reviews
        .iter()
        .take(MAX_REVIEWS)
        .map(format_review)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{INSTRUCTIONS}\n\nReviews:\n{combined}\n\n{CLOSING}")
}
