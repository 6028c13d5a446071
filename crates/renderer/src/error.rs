use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to serialize graph data: {0}")]
    Json(#[from] serde_json::Error),
}
