//! HTML parsers for IMDb
//!
//! Contains modules for parsing different page types. These are the only
//! places that know the catalog's markup.

pub mod reviews;
pub mod search;
pub mod title;

pub use reviews::{parse_review_text, parse_reviews};
pub use search::parse_search_results;
pub use title::parse_poster_url;
