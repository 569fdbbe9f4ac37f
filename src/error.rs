// src/error.rs
use thiserror::Error;

use crate::core::net::NetError;

/// Everything that can stop a scrape step. Structural oddities in the markup
/// are never errors; they degrade to missing fields.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error("malformed panel payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}
