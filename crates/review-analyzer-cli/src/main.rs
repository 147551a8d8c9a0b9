//! Interactive console front end
//!
//! Run with: cargo run -p review-analyzer-cli -- "the matrix"

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use review_analyzer_core::{
    Analysis, ClientConfig, ReviewAnalyzer, SearchResult, SummarizerConfig, SummaryReport,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const RULE: &str = "================================================================================";
const THIN_RULE: &str = "--------------------------------------------------------------------------------";

/// Summarize IMDb user reviews of a movie or series with a language model
#[derive(Debug, Parser)]
#[command(name = "review-analyzer", version, about)]
struct Args {
    /// Movie or series name; prompted for when omitted
    title: Option<String>,

    /// Analyze this IMDb title id directly instead of searching
    #[arg(long)]
    imdb_id: Option<String>,

    /// Take the first search result without asking
    #[arg(long)]
    first: bool,

    /// Directory for the summary report
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Completion model identifier (overrides OPENROUTER_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Catalog request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .compact()
        .init();

    let args = Args::parse();

    let mut summarizer = SummarizerConfig::from_env().context("invalid completion settings")?;
    if let Some(model) = &args.model {
        summarizer.model = model.clone();
    }
    let client = ClientConfig {
        timeout_secs: args.timeout,
        ..ClientConfig::default()
    };
    debug!(model = %summarizer.model, timeout_secs = client.timeout_secs, "configuration loaded");
    let analyzer = ReviewAnalyzer::with_config(client, summarizer)?;

    println!("{RULE}");
    println!("IMDb Movie/Series Review Analyzer");
    println!("{RULE}");

    let name = match &args.title {
        Some(title) => title.trim().to_string(),
        None => prompt("\nEnter the name of a movie or web series:\n> ")?,
    };
    if name.is_empty() {
        bail!("movie name cannot be empty");
    }

    let (name, id) = match args.imdb_id.clone() {
        Some(id) => (name, id),
        None => {
            println!("\nSearching for '{}' on IMDb...", name);
            let candidates = analyzer.candidates(&name).await?;
            debug!(count = candidates.len(), "candidates found");
            let chosen = match args.first {
                true => candidates.into_iter().next(),
                false => choose(candidates)?,
            };
            let chosen = chosen.context("no title selected")?;
            println!("✓ Found: {} ({})", chosen.title, chosen.id);
            (chosen.title, chosen.id)
        }
    };

    println!("\nFetching reviews and asking the model for a summary...");
    info!(title = %name, id = %id, "analyzing reviews");
    let analysis = analyzer.analyze(&name, Some(&id)).await?;
    print_analysis(&analysis);

    let path = SummaryReport::from(&analysis)
        .write_to_dir(&args.output_dir)
        .context("failed to write summary report")?;
    println!("\nSummary saved to '{}'", path.display());

    Ok(())
}

/// Lists candidates and reads a 1-based choice; Enter picks the first
fn choose(candidates: Vec<SearchResult>) -> Result<Option<SearchResult>> {
    if candidates.len() == 1 {
        return Ok(candidates.into_iter().next());
    }

    println!("\nFound {} titles:", candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        let year = c.year.as_deref().map(|y| format!(" ({})", y)).unwrap_or_default();
        println!("  {:>2}. {}{} [{}] {}", i + 1, c.title, year, c.media_type.label(), c.id);
    }

    let answer = prompt("\nSelect a title [1]: ")?;
    let index = if answer.is_empty() {
        1
    } else {
        answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=candidates.len()).contains(n))
            .with_context(|| format!("'{}' is not a number between 1 and {}", answer, candidates.len()))?
    };

    Ok(candidates.into_iter().nth(index - 1))
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_analysis(analysis: &Analysis) {
    println!("\nIMDb ID: {}", analysis.catalog_id);
    println!("Reviews URL: {}", analysis.source_url);
    println!("Reviews analyzed: {}", analysis.review_count);
    println!("{RULE}");

    for (i, review) in analysis.reviews.iter().enumerate() {
        println!("\nReview #{}", i + 1);
        println!("Rating: {}", review.rating);
        println!("Review: {}...", review.text);
        println!("{THIN_RULE}");
    }

    println!("\nAI SUMMARY:");
    println!("{RULE}");
    println!("{}", analysis.summary_text);
    println!("{RULE}");
    match analysis.score {
        Some(score) => println!("Overall score: {}/100", score),
        None => println!("Overall score: N/A"),
    }
}
