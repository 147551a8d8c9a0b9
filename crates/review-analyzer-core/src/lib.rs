//! IMDb Review Analyzer Core Library
//!
//! Provides an async API for finding titles on IMDb, scraping their user
//! reviews and asking a language model for a sentiment summary and score.
//!
//! # Overview
//!
//! This crate provides the whole pipeline shared by the front ends:
//! - HTTP client sending browser-like requests to the catalog
//! - HTML parsers for search results, title pages and review listings
//! - Prompt builder and chat-completion client with score extraction
//! - Plain-text report writer
//!
//! # Example
//!
//! ```no_run
//! use review_analyzer_core::{ClientConfig, Result, ReviewAnalyzer, SummarizerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let analyzer = ReviewAnalyzer::with_config(
//!         ClientConfig::default(),
//!         SummarizerConfig::from_env()?,
//!     )?;
//!
//!     for title in analyzer.search("inception").await? {
//!         println!("{} {} ({})", title.id, title.title, title.media_type.label());
//!     }
//!
//!     let analysis = analyzer.analyze("Inception", Some("tt1375666")).await?;
//!     println!("{}", analysis.summary_text);
//!     Ok(())
//! }
//! ```
//!
//! # Markup changes
//!
//! All knowledge of the catalog's HTML lives in [`parser`] and is reached
//! only through the [`Catalog`] trait, so a site redesign touches those
//! modules and nothing else.

mod analyzer;
mod catalog;
mod client;
mod error;
pub mod parser;
mod prompt;
mod report;
mod summarizer;
mod types;
pub mod url;

// Re-export main analyzer API
pub use analyzer::{PLACEHOLDER_POSTER, ReviewAnalyzer};

// Re-export catalog adapter and HTTP client
pub use catalog::{Catalog, ImdbCatalog};
pub use client::{CatalogClient, ClientConfig};

// Re-export error types
pub use error::{AnalyzerError, Result};

// Re-export prompt and summarizer
pub use prompt::{build_prompt, format_review};
pub use summarizer::{
    API_KEY_VAR, DEFAULT_API_URL, DEFAULT_MODEL, Summarizer, SummarizerClient, SummarizerConfig,
    extract_score,
};

// Re-export report writer
pub use report::SummaryReport;

// Re-export data types
pub use types::{
    Analysis, DISPLAYED_REVIEWS, MAX_REVIEWS, MAX_SEARCH_RESULTS, MediaType, NO_RATING,
    REVIEW_DISPLAY_CHARS, REVIEW_PROMPT_CHARS, Review, SearchResult, Summary, truncate_chars,
};
