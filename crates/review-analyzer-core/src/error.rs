//! Error types for the review analyzer
//!
//! Provides a single error enum with human-readable messages
//! and string serialization for JSON front ends.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all review analyzer operations
///
/// Implements Display for human-readable messages and Serialize
/// so it can be embedded directly in JSON payloads.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request exceeded its timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Catalog site answered with a non-success status
    #[error("Catalog request failed. Status code: {0}")]
    CatalogStatus(u16),

    /// Completion endpoint answered with a non-success status
    #[error("AI API Error: {status}")]
    CompletionStatus { status: u16, body: String },

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Nothing usable found (no search results, no reviews)
    #[error("{0}")]
    NotFound(String),

    /// Caller supplied an empty or malformed value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Completion response did not have the expected shape
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing the summary report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Classify a reqwest error, splitting timeouts from other transport failures
    pub(crate) fn from_transport(error: reqwest::Error, what: &str) -> Self {
        if error.is_timeout() {
            AnalyzerError::Timeout(what.to_string())
        } else {
            AnalyzerError::HttpError(error)
        }
    }
}

impl Serialize for AnalyzerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for review analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;
