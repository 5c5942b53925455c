use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoreError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ScoreError::InvalidInput(message.into())
    }

    pub fn malformed(path: &Path, err: &serde_json::Error) -> Self {
        ScoreError::InvalidInput(format!("{}: {}", path.display(), err))
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
