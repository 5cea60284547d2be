use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JellyError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Settings not found at: {0}")]
    SettingsNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Cursor offset {offset} is outside the document (length {len})")]
    InvalidCursor { offset: usize, len: usize },
    #[error("Error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, JellyError>;
