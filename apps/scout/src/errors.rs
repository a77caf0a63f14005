use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Every pipeline stage returns `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scrape trigger failed (status {status}): {body}")]
    Trigger { status: u16, body: String },

    #[error("Snapshot polling failed (status {status}): {body}")]
    Snapshot { status: u16, body: String },

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    Export(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
