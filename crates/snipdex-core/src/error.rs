use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnipdexError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Duplicate {kind} id '{id}' in catalog")]
    DuplicateId { kind: &'static str, id: String },
    #[error("Catalog contains no categories")]
    EmptyCatalog,
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    #[error("Logging error: {0}")]
    Logging(String),
    #[error("Error: {0}")]
    Other(String),
}

impl SnipdexError {
    pub fn category_not_found(id: &str) -> Self {
        SnipdexError::NotFound {
            kind: "Category",
            id: id.to_string(),
        }
    }

    pub fn snippet_not_found(id: &str) -> Self {
        SnipdexError::NotFound {
            kind: "Snippet",
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnipdexError>;
