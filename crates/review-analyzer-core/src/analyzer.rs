//! Main analyzer API
//!
//! Ties a [`Catalog`] and a [`Summarizer`] together into the search and
//! analyze flows shared by the command line and web front ends.

use tracing::info;

use crate::catalog::{Catalog, ImdbCatalog};
use crate::client::ClientConfig;
use crate::error::{AnalyzerError, Result};
use crate::prompt::build_prompt;
use crate::summarizer::{Summarizer, SummarizerClient, SummarizerConfig};
use crate::types::{Analysis, DISPLAYED_REVIEWS, SearchResult};
use crate::url::is_valid_title_id;

/// Shown when neither the search page nor the title page has a poster
pub const PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/300x450/667eea/ffffff?text=No+Poster";

/// Search and review-analysis pipeline
///
/// Holds no mutable state; one instance can serve many requests.
#[derive(Debug)]
pub struct ReviewAnalyzer<C = ImdbCatalog, S = SummarizerClient> {
    catalog: C,
    summarizer: S,
}

impl ReviewAnalyzer {
    /// Create an analyzer for IMDb with the given completion configuration
    ///
    /// # Errors
    /// - `Config` if the summarizer configuration is invalid
    /// - `HttpError` if an HTTP client cannot be built
    pub fn with_config(client: ClientConfig, summarizer: SummarizerConfig) -> Result<Self> {
        Ok(Self::new(
            ImdbCatalog::with_config(client)?,
            SummarizerClient::new(summarizer)?,
        ))
    }
}

impl<C: Catalog, S: Summarizer> ReviewAnalyzer<C, S> {
    pub fn new(catalog: C, summarizer: S) -> Self {
        Self {
            catalog,
            summarizer,
        }
    }

    /// Search for titles by name
    ///
    /// Every returned result has a poster URL: taken from the search page,
    /// else from the title page, else [`PLACEHOLDER_POSTER`].
    ///
    /// # Errors
    /// - `InvalidInput` if name is empty or whitespace only
    /// - `NotFound` if the catalog lists no matching titles
    /// - `CatalogStatus`, `Timeout`, `HttpError` if the search page cannot be fetched
    pub async fn search(&self, name: &str) -> Result<Vec<SearchResult>> {
        let mut results = self.candidates(name).await?;

        for result in results.iter_mut().filter(|r| {
            r.poster_url
                .as_deref()
                .is_none_or(|poster| poster.trim().is_empty())
        }) {
            let poster = self.catalog.poster_url(&result.id).await;
            result.poster_url = Some(poster.unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()));
        }

        info!(count = results.len(), "search complete");
        Ok(results)
    }

    /// Search for titles by name without resolving missing posters
    ///
    /// # Errors
    /// Same as [`ReviewAnalyzer::search`]
    pub async fn candidates(&self, name: &str) -> Result<Vec<SearchResult>> {
        let query = non_empty(name)?;
        let results = self.catalog.search(query).await?;

        if results.is_empty() {
            return Err(AnalyzerError::NotFound(format!(
                "No results found for '{}'. Please check the spelling or try a different search term.",
                query
            )));
        }
        Ok(results)
    }

    /// Analyze the reviews of one title
    ///
    /// With `id` the given title is analyzed and `name` is used as its
    /// display name. Without it, the first search match for `name` is used.
    ///
    /// # Errors
    /// - `InvalidInput` if name is blank or `id` is not a catalog identifier
    /// - `NotFound` if the search or the review page yields nothing
    /// - `CatalogStatus`, `CompletionStatus`, `Timeout`, `HttpError` on upstream failures
    pub async fn analyze(&self, name: &str, id: Option<&str>) -> Result<Analysis> {
        let query = non_empty(name)?;

        let (catalog_id, title_name) = match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => {
                if !is_valid_title_id(id) {
                    return Err(AnalyzerError::InvalidInput(format!(
                        "'{}' is not an IMDb title id",
                        id
                    )));
                }
                (id.to_string(), query.to_string())
            }
            None => {
                let first = self
                    .catalog
                    .search(query)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| {
                        AnalyzerError::NotFound(format!("No results found for '{}' on IMDb.", query))
                    })?;
                (first.id, first.title)
            }
        };

        info!(id = %catalog_id, title = %title_name, "fetching reviews");
        let reviews = self.catalog.reviews(&catalog_id).await?;
        let prompt = build_prompt(&reviews);
        let summary = self.summarizer.summarize(&prompt).await?;
        info!(id = %catalog_id, score = %summary.score_label(), "analysis complete");

        Ok(Analysis {
            source_url: self.catalog.reviews_url(&catalog_id),
            title_name,
            catalog_id,
            review_count: reviews.len(),
            reviews: reviews
                .iter()
                .take(DISPLAYED_REVIEWS)
                .map(|r| r.for_display())
                .collect(),
            summary_text: summary.text,
            score: summary.score,
        })
    }
}

fn non_empty(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AnalyzerError::InvalidInput(
            "Movie name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MediaType, Review, Summary};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeCatalog {
        results: Vec<SearchResult>,
        poster: Option<String>,
        reviews: Vec<Review>,
        poster_lookups: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Ok(self.results.clone())
        }

        async fn poster_url(&self, id: &str) -> Option<String> {
            self.poster_lookups.lock().unwrap().push(id.to_string());
            self.poster.clone()
        }

        async fn reviews(&self, _id: &str) -> Result<Vec<Review>> {
            if self.reviews.is_empty() {
                return Err(AnalyzerError::NotFound("No reviews found for this title.".to_string()));
            }
            Ok(self.reviews.clone())
        }

        fn reviews_url(&self, id: &str) -> String {
            format!("https://catalog.test/title/{}/reviews/", id)
        }
    }

    struct FakeSummarizer {
        text: String,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeSummarizer {
        fn answering(text: &str) -> Self {
            Self {
                text: text.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn summarize(&self, prompt: &str) -> Result<Summary> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(Summary {
                text: self.text.clone(),
                score: crate::summarizer::extract_score(&self.text),
            })
        }
    }

    fn result(id: &str, title: &str, poster: Option<&str>) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: title.to_string(),
            year: None,
            media_type: MediaType::Movie,
            poster_url: poster.map(str::to_string),
        }
    }

    fn reviews(n: usize) -> Vec<Review> {
        (0..n)
            .map(|i| Review {
                rating: format!("{}/10", i % 10 + 1),
                text: format!("review {}", i),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let analyzer = ReviewAnalyzer::new(FakeCatalog::default(), FakeSummarizer::answering(""));
        match analyzer.search("   ").await {
            Err(AnalyzerError::InvalidInput(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_no_results_is_not_found() {
        let analyzer = ReviewAnalyzer::new(FakeCatalog::default(), FakeSummarizer::answering(""));
        match analyzer.search("zzzz").await {
            Err(AnalyzerError::NotFound(msg)) => assert!(msg.contains("'zzzz'")),
            other => panic!("Expected NotFound error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_candidates_skip_poster_lookup() {
        let catalog = FakeCatalog {
            results: vec![result("tt2", "Needs Lookup", None)],
            ..FakeCatalog::default()
        };
        let analyzer = ReviewAnalyzer::new(catalog, FakeSummarizer::answering(""));

        let results = analyzer.candidates("anything").await.unwrap();
        assert_eq!(results[0].poster_url, None);
        assert!(analyzer.catalog.poster_lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_poster_fallback_chain() {
        let catalog = FakeCatalog {
            results: vec![
                result("tt1", "Has Poster", Some("https://img/1.jpg")),
                result("tt2", "Needs Lookup", None),
            ],
            poster: Some("https://img/2.jpg".to_string()),
            ..FakeCatalog::default()
        };
        let analyzer = ReviewAnalyzer::new(catalog, FakeSummarizer::answering(""));

        let results = analyzer.search("anything").await.unwrap();
        assert_eq!(results[0].poster_url.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(results[1].poster_url.as_deref(), Some("https://img/2.jpg"));
        assert_eq!(*analyzer.catalog.poster_lookups.lock().unwrap(), vec!["tt2"]);
    }

    #[tokio::test]
    async fn test_search_blank_poster_uses_fallback() {
        let catalog = FakeCatalog {
            results: vec![result("tt4", "Blank Poster", Some(""))],
            poster: Some("https://img/4.jpg".to_string()),
            ..FakeCatalog::default()
        };
        let analyzer = ReviewAnalyzer::new(catalog, FakeSummarizer::answering(""));

        let results = analyzer.search("anything").await.unwrap();
        assert_eq!(results[0].poster_url.as_deref(), Some("https://img/4.jpg"));
        assert_eq!(*analyzer.catalog.poster_lookups.lock().unwrap(), vec!["tt4"]);
    }

    #[tokio::test]
    async fn test_search_placeholder_poster() {
        let catalog = FakeCatalog {
            results: vec![result("tt3", "No Poster Anywhere", None)],
            ..FakeCatalog::default()
        };
        let analyzer = ReviewAnalyzer::new(catalog, FakeSummarizer::answering(""));

        let results = analyzer.search("anything").await.unwrap();
        assert_eq!(results[0].poster_url.as_deref(), Some(PLACEHOLDER_POSTER));
    }

    #[tokio::test]
    async fn test_analyze_with_id_uses_given_name() {
        let catalog = FakeCatalog {
            reviews: reviews(3),
            ..FakeCatalog::default()
        };
        let analyzer = ReviewAnalyzer::new(
            catalog,
            FakeSummarizer::answering("Great.\nOverall Rating: 73/100"),
        );

        let analysis = analyzer.analyze("My Title", Some("tt1375666")).await.unwrap();
        assert_eq!(analysis.title_name, "My Title");
        assert_eq!(analysis.catalog_id, "tt1375666");
        assert_eq!(analysis.source_url, "https://catalog.test/title/tt1375666/reviews/");
        assert_eq!(analysis.review_count, 3);
        assert_eq!(analysis.score, Some(73));
        assert_eq!(analysis.summary_text, "Great.\nOverall Rating: 73/100");
    }

    #[tokio::test]
    async fn test_analyze_without_id_uses_first_match() {
        let catalog = FakeCatalog {
            results: vec![
                result("tt0133093", "The Matrix", None),
                result("tt0234215", "The Matrix Reloaded", None),
            ],
            reviews: reviews(25),
            ..FakeCatalog::default()
        };
        let analyzer = ReviewAnalyzer::new(catalog, FakeSummarizer::answering("No score"));

        let analysis = analyzer.analyze("matrix", None).await.unwrap();
        assert_eq!(analysis.catalog_id, "tt0133093");
        assert_eq!(analysis.title_name, "The Matrix");
        assert_eq!(analysis.review_count, 25);
        assert_eq!(analysis.reviews.len(), DISPLAYED_REVIEWS);
        assert_eq!(analysis.score, None);

        let prompts = analyzer.summarizer.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Review: review 0"));
    }

    #[tokio::test]
    async fn test_analyze_blank_id_falls_back_to_search() {
        let catalog = FakeCatalog {
            results: vec![result("tt0133093", "The Matrix", None)],
            reviews: reviews(1),
            ..FakeCatalog::default()
        };
        let analyzer = ReviewAnalyzer::new(catalog, FakeSummarizer::answering("ok"));

        let analysis = analyzer.analyze("matrix", Some("  ")).await.unwrap();
        assert_eq!(analysis.catalog_id, "tt0133093");
    }

    #[tokio::test]
    async fn test_analyze_invalid_id() {
        let analyzer = ReviewAnalyzer::new(FakeCatalog::default(), FakeSummarizer::answering(""));
        let result = analyzer.analyze("x", Some("../etc")).await;
        assert!(matches!(result, Err(AnalyzerError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_analyze_no_search_results() {
        let analyzer = ReviewAnalyzer::new(FakeCatalog::default(), FakeSummarizer::answering(""));
        match analyzer.analyze("nothing", None).await {
            Err(AnalyzerError::NotFound(msg)) => assert!(msg.contains("on IMDb")),
            other => panic!("Expected NotFound error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_no_reviews() {
        let analyzer = ReviewAnalyzer::new(FakeCatalog::default(), FakeSummarizer::answering(""));
        let result = analyzer.analyze("x", Some("tt1")).await;
        assert!(matches!(result, Err(AnalyzerError::NotFound(_))));
        assert!(analyzer.summarizer.prompts.lock().unwrap().is_empty());
    }
}
