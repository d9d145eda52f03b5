use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the storage, config, and CLI layers.
///
/// The computation services in [`crate::core`] are total functions and
/// never construct one of these; degenerate numeric input is coerced to
/// zero at the serde boundary instead.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Book not found: {0}")]
    BookNotFound(String),
    #[error("Project not found: {0}")]
    ProjectNotFound(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, SiteError>;

impl From<std::io::Error> for SiteError {
    fn from(err: std::io::Error) -> Self {
        SiteError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Storage(err.to_string())
    }
}
