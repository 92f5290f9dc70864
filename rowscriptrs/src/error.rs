use thiserror::Error;

pub type Result<T> = std::result::Result<T, RowscriptError>;

#[derive(Debug, Error)]
pub enum RowscriptError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("filter payload error: {0}")]
    Payload(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
