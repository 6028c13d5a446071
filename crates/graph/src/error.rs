use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("edge endpoint missing from graph: {from} -> {to}")]
    MissingEndpoint { from: String, to: String },

    #[error("node not found: {0}")]
    NodeNotFound(String),
}
