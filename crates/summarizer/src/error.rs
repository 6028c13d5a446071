use thiserror::Error;

pub type Result<T> = std::result::Result<T, SummarizerError>;

#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("summarization enabled but no API key configured (set ASTMAP_API_KEY)")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
