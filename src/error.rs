//! Error types for the stats board

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response missing field: {0}")]
    MissingField(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No public API for {0}")]
    Unsupported(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
