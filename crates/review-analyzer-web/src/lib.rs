//! Web form front end for the IMDb review analyzer
//!
//! Exposes the search → select → analyze flow over HTTP:
//!
//! - `GET  /`         - the search form
//! - `GET  /health`   - liveness check
//! - `POST /search`   - form field `movie_name`, answers with candidate titles
//! - `POST /analyze`  - form fields `movie_name` and optional `imdb_id`

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use review_analyzer_core::{Analysis, AnalyzerError, ReviewAnalyzer, SearchResult, SummaryReport};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// Listen address (`BIND_ADDR`, default 0.0.0.0:8000)
    pub bind_addr: SocketAddr,
    /// Where to write per-analysis reports (`REPORT_DIR`); none when unset
    pub report_dir: Option<PathBuf>,
}

impl WebConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw
            .parse()
            .map_err(|e| anyhow::anyhow!("BIND_ADDR '{}' is not a socket address: {}", raw, e))?;
        let report_dir = lookup("REPORT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self {
            bind_addr,
            report_dir,
        })
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<ReviewAnalyzer>,
    report_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(analyzer: ReviewAnalyzer, report_dir: Option<PathBuf>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            report_dir,
        }
    }
}

/// JSON error answer: `{ "error": message }` with a matching status
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<AnalyzerError> for ApiError {
    fn from(err: AnalyzerError) -> Self {
        match err {
            AnalyzerError::InvalidInput(_)
            | AnalyzerError::CatalogStatus(_)
            | AnalyzerError::CompletionStatus { .. } => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            AnalyzerError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            AnalyzerError::Timeout(_) => Self::new(
                StatusCode::REQUEST_TIMEOUT,
                "Request timeout. Please try again.",
            ),
            other => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {}", other),
            ),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), message = %self.message, "request failed");
        } else {
            warn!(status = self.status.as_u16(), message = %self.message, "request rejected");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub movie_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub movie_name: String,
    pub imdb_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchResult>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/search", post(search))
        .route("/analyze", post(analyze))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn search(
    State(state): State<AppState>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Form(form) = form?;
    info!(movie_name = %form.movie_name, "search request");
    let results = state.analyzer.search(&form.movie_name).await?;
    Ok(Json(SearchResponse {
        success: true,
        count: results.len(),
        results,
    }))
}

async fn analyze(
    State(state): State<AppState>,
    form: Result<Form<AnalyzeForm>, FormRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Form(form) = form?;
    info!(movie_name = %form.movie_name, imdb_id = ?form.imdb_id, "analyze request");
    let analysis = state
        .analyzer
        .analyze(&form.movie_name, form.imdb_id.as_deref())
        .await?;

    if let Some(dir) = &state.report_dir {
        let report = SummaryReport::from(&analysis);
        let dir = dir.clone();
        tokio::task::spawn_blocking(move || report.write_to_dir(&dir))
            .await
            .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;
    }

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}
