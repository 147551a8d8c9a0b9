//! Core data types for the review analyzer
//!
//! Field names on the serialized forms follow the JSON contract
//! consumed by the web form.

use serde::{Deserialize, Serialize, Serializer};

/// Maximum number of search candidates returned for one query
pub const MAX_SEARCH_RESULTS: usize = 15;

/// Maximum number of review blocks collected from a listing page
pub const MAX_REVIEWS: usize = 20;

/// Number of reviews echoed back to the caller for display
pub const DISPLAYED_REVIEWS: usize = 10;

/// Character budget for a review body sent to the summarizer
pub const REVIEW_PROMPT_CHARS: usize = 500;

/// Character budget for a review body shown to the user
pub const REVIEW_DISPLAY_CHARS: usize = 400;

/// Rating label used when a review carries no leading score
pub const NO_RATING: &str = "No rating";

/// Kind of title listed in the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    #[default]
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Series")]
    TvSeries,
    #[serde(rename = "Mini Series")]
    MiniSeries,
}

impl MediaType {
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::TvSeries => "TV Series",
            MediaType::MiniSeries => "Mini Series",
        }
    }
}

/// One candidate title from a catalog search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Catalog identifier (e.g., "tt1375666")
    #[serde(rename = "imdb_id")]
    pub id: String,

    /// Title text as shown in the result list
    pub title: String,

    /// Release year (e.g., "2010"), serialized as "" when unknown
    #[serde(
        serialize_with = "serialize_or_empty",
        deserialize_with = "deserialize_empty_as_none"
    )]
    pub year: Option<String>,

    /// Movie, TV series or mini series
    #[serde(rename = "type")]
    pub media_type: MediaType,

    /// Poster image URL
    #[serde(rename = "poster")]
    pub poster_url: Option<String>,
}

/// One user review scraped from a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// "N/10" or "No rating"
    pub rating: String,

    /// Review body, truncated to [`REVIEW_PROMPT_CHARS`]
    pub text: String,
}

impl Review {
    pub fn has_rating(&self) -> bool {
        self.rating != NO_RATING
    }

    /// Copy of this review with the body cut down for display
    pub fn for_display(&self) -> Review {
        Review {
            rating: self.rating.clone(),
            text: truncate_chars(&self.text, REVIEW_DISPLAY_CHARS),
        }
    }
}

/// Completion text plus the score pulled out of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub score: Option<u32>,
}

impl Summary {
    /// Score digits, or "N/A" when the completion carried none
    pub fn score_label(&self) -> String {
        match self.score {
            Some(score) => score.to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// Outcome of analyzing one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    #[serde(rename = "movie_name")]
    pub title_name: String,

    #[serde(rename = "imdb_id")]
    pub catalog_id: String,

    #[serde(rename = "reviews_url")]
    pub source_url: String,

    /// Number of reviews sent to the summarizer
    #[serde(rename = "total_reviews")]
    pub review_count: usize,

    /// First [`DISPLAYED_REVIEWS`] reviews, display-truncated
    pub reviews: Vec<Review>,

    #[serde(rename = "ai_summary")]
    pub summary_text: String,

    #[serde(rename = "ai_rating", serialize_with = "serialize_score")]
    pub score: Option<u32>,
}

/// Truncate to at most `max` characters, respecting char boundaries
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn serialize_or_empty<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

fn deserialize_empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn serialize_score<S>(score: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match score {
        Some(score) => serializer.serialize_str(&score.to_string()),
        None => serializer.serialize_str("N/A"),
    }
}
