use crate::error::{Result, SummarizerError};
use serde::Deserialize;

/// `[summarizer]` section of the configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Prefer the `ASTMAP_API_KEY` environment variable; the config
    /// file value is a fallback for local runs.
    pub api_key: Option<String>,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            model: "default".to_string(),
            api_key: None,
            max_retries: 3,
            retry_delay_ms: 2000,
        }
    }
}

impl SummarizerConfig {
    /// Resolve the API key, environment first.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var("ASTMAP_API_KEY") {
            if !key.is_empty() {
                return Ok(key);
            }
        }
        match &self.api_key {
            Some(key) if !key.is_empty() => {
                log::warn!(
                    "using API key from the config file; prefer the ASTMAP_API_KEY environment variable"
                );
                Ok(key.clone())
            }
            _ => Err(SummarizerError::MissingApiKey),
        }
    }
}
