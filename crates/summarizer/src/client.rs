use crate::config::SummarizerConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What one summarization attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summary(String),
    /// The service refused the prompt. Not retried.
    Blocked,
    /// Empty answer, or transport/service failure after all retries.
    Unavailable,
}

/// Produces a short natural-language summary for a prompt. The graph
/// pipeline only depends on this trait, so tests substitute a scripted
/// implementation and never touch the network.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, prompt: &str) -> SummaryOutcome;
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    block_reason: Option<String>,
}

/// Summarization over HTTP with bounded retries and linear backoff.
pub struct HttpSummarizer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpSummarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            max_retries: config.max_retries.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    async fn attempt(&self, prompt: &str) -> Result<SummaryOutcome> {
        let request = SummaryRequest {
            model: &self.model,
            prompt,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: SummaryResponse = response.json().await?;
        if let Some(reason) = body.block_reason {
            log::warn!("summarization prompt blocked: {reason}");
            return Ok(SummaryOutcome::Blocked);
        }
        match body.text.as_deref().map(clean_summary) {
            Some(text) if !text.is_empty() => Ok(SummaryOutcome::Summary(text)),
            _ => {
                log::warn!("summarization service returned empty content");
                Ok(SummaryOutcome::Unavailable)
            }
        }
    }
}

#[async_trait]
impl Summarize for HttpSummarizer {
    async fn summarize(&self, prompt: &str) -> SummaryOutcome {
        for attempt in 1..=self.max_retries {
            match self.attempt(prompt).await {
                Ok(outcome) => return outcome,
                Err(err) => {
                    log::warn!(
                        "summarization call failed (attempt {attempt}/{}): {err}",
                        self.max_retries
                    );
                    // Linear backoff: 1x, 2x, 3x the base delay.
                    tokio::time::sleep(self.retry_delay * attempt).await;
                }
            }
        }
        log::error!("summarization retries exhausted");
        SummaryOutcome::Unavailable
    }
}

/// Trim the answer and drop a leading `Summary:` prefix the service
/// tends to echo back.
fn clean_summary(text: &str) -> String {
    let text = text.trim();
    let lower = text.to_lowercase();
    if let Some(rest) = lower
        .starts_with("summary:")
        .then(|| text["summary:".len()..].trim_start())
    {
        rest.to_string()
    } else {
        text.to_string()
    }
}
