use review_analyzer_core::{ClientConfig, ReviewAnalyzer, SummarizerConfig};
use review_analyzer_web::{AppState, WebConfig, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let web = WebConfig::from_env()?;
    let summarizer = SummarizerConfig::from_env()?;
    info!(model = %summarizer.model, report_dir = ?web.report_dir, "starting review analyzer web");

    let analyzer = ReviewAnalyzer::with_config(ClientConfig::default(), summarizer)?;
    let app = router(AppState::new(analyzer, web.report_dir));

    let listener = tokio::net::TcpListener::bind(web.bind_addr).await?;
    info!("Server running on http://{}", web.bind_addr);
    info!("  GET  /         - Search form");
    info!("  POST /search   - Find titles (form field: movie_name)");
    info!("  POST /analyze  - Summarize reviews (form fields: movie_name, imdb_id)");

    axum::serve(listener, app).await?;
    Ok(())
}
