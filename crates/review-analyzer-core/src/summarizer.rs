//! Completion endpoint client
//!
//! Sends the review prompt as a single-turn chat completion and pulls the
//! closing "Overall Rating: X/100" score out of the answer.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AnalyzerError, Result};
use crate::types::Summary;

/// Default OpenRouter chat completions endpoint
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

static OVERALL_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)overall\s+rating\W*?(\d+(?:\.\d+)?)\s*/\s*100\b")
        .expect("valid overall score regex")
});

static ANY_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*/\s*100\b").expect("valid score regex"));

/// Configuration for the completion client
#[derive(Clone)]
pub struct SummarizerConfig {
    /// Bearer credential; required, no built-in fallback
    pub api_key: String,
    /// Chat completions URL (default: OpenRouter)
    pub api_url: String,
    /// Model identifier (default: deepseek/deepseek-chat)
    pub model: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SummarizerConfig {
    /// Config with the given key and default endpoint, model and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Reads the configuration from the process environment
    ///
    /// `OPENROUTER_API_KEY` is required. `OPENROUTER_API_URL` and
    /// `OPENROUTER_MODEL` override the defaults when set.
    ///
    /// # Errors
    /// Returns `Config` if the key is missing or blank
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`SummarizerConfig::from_env`] with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).unwrap_or_default();
        let mut config = Self::new(api_key);

        if let Some(url) = lookup("OPENROUTER_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url;
        }
        if let Some(model) = lookup("OPENROUTER_MODEL").filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the credential and endpoint are usable
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(AnalyzerError::Config(format!("{} is not set", API_KEY_VAR)));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(AnalyzerError::Config(format!(
                "completion endpoint is not an HTTP URL: {}",
                self.api_url
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AnalyzerError::Config("model identifier is empty".to_string()));
        }
        Ok(())
    }
}

/// Anything that can turn a prompt into a [`Summary`]
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<Summary>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone)]
pub struct SummarizerClient {
    client: reqwest::Client,
    config: SummarizerConfig,
}

impl SummarizerClient {
    /// Create a client from a validated configuration
    ///
    /// # Errors
    /// - `Config` if the configuration is invalid
    /// - `HttpError` if the HTTP client cannot be built
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AnalyzerError::HttpError)?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Summarizer for SummarizerClient {
    /// Posts the prompt and returns the completion text with its score
    ///
    /// # Errors
    /// - `Timeout` if the endpoint does not answer in time
    /// - `CompletionStatus` on a non-success status
    /// - `MalformedResponse` if the body has no `choices[0].message.content`
    async fn summarize(&self, prompt: &str) -> Result<Summary> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        info!(model = %self.config.model, prompt_chars = prompt.len(), "requesting completion");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalyzerError::from_transport(e, "completion endpoint"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalyzerError::from_transport(e, "completion endpoint"))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), %body, "completion endpoint returned an error");
            return Err(AnalyzerError::CompletionStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = parse_completion(&body)?;
        let score = extract_score(&text);
        Ok(Summary { text, score })
    }
}

/// Pulls `choices[0].message.content` out of a completion body
fn parse_completion(body: &str) -> Result<String> {
    let parsed: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AnalyzerError::MalformedResponse("no completion content".to_string()))
}

/// Extracts the 0-100 score from a completion
///
/// Prefers an explicit "Overall Rating: X/100" token and otherwise takes the
/// last "X/100" in the text. Decimal scores are rounded; a value above 100
/// yields `None` rather than falling back to another fraction.
pub fn extract_score(text: &str) -> Option<u32> {
    let caps = OVERALL_SCORE
        .captures(text)
        .or_else(|| ANY_SCORE.captures_iter(text).last())?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let rounded = value.round();
    (rounded <= 100.0).then_some(rounded as u32)
}
