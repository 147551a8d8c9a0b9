//! Catalog adapter
//!
//! [`Catalog`] is the seam between the analyzer and a concrete review site.
//! [`ImdbCatalog`] is the only implementation; it owns the URL layout and
//! calls the HTML parsers, so markup changes stay inside this module and
//! `parser/`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::{CatalogClient, ClientConfig};
use crate::error::Result;
use crate::parser::{parse_poster_url, parse_reviews, parse_search_results};
use crate::types::{Review, SearchResult};
use crate::url::{reviews_path, search_path, title_path};

/// Source of search results, posters and reviews
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Candidate titles for a free-text query, in catalog order
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Poster looked up on the title's own page, if any
    async fn poster_url(&self, id: &str) -> Option<String>;

    /// Reviews listed for a title
    async fn reviews(&self, id: &str) -> Result<Vec<Review>>;

    /// Public URL of the review listing for a title
    fn reviews_url(&self, id: &str) -> String;
}

/// [`Catalog`] backed by the IMDb website
#[derive(Debug, Clone)]
pub struct ImdbCatalog {
    client: CatalogClient,
}

impl ImdbCatalog {
    /// Create a catalog with default client configuration
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: CatalogClient::new()?,
        })
    }

    /// Create a catalog with custom client configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: CatalogClient::with_config(config)?,
        })
    }
}

#[async_trait]
impl Catalog for ImdbCatalog {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let html = self.client.fetch(&search_path(query)).await?;
        let results = parse_search_results(&html)?;
        debug!(query, count = results.len(), "parsed search results");
        Ok(results)
    }

    async fn poster_url(&self, id: &str) -> Option<String> {
        let html = match self
            .client
            .fetch_with_timeout(&title_path(id), self.client.poster_timeout())
            .await
        {
            Ok(html) => html,
            Err(e) => {
                warn!(id, error = %e, "poster lookup failed");
                return None;
            }
        };
        parse_poster_url(&html)
    }

    async fn reviews(&self, id: &str) -> Result<Vec<Review>> {
        let html = self.client.fetch(&reviews_path(id)).await?;
        let reviews = parse_reviews(&html)?;
        debug!(id, count = reviews.len(), "parsed reviews");
        Ok(reviews)
    }

    fn reviews_url(&self, id: &str) -> String {
        format!("{}{}", self.client.base_url(), reviews_path(id))
    }
}
