use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyntaxError>;

#[derive(Error, Debug)]
pub enum SyntaxError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root is not a tagged node: {0}")]
    InvalidRoot(String),
}
