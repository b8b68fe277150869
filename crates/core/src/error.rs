//! Errors surfaced by reader setup. Reading itself never fails: content,
//! matching and measurement problems degrade instead of erroring.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
