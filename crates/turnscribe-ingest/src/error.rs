//! Ingestion error types

use thiserror::Error;

/// Ingestion-related errors
#[derive(Error, Debug)]
pub enum IngestError {
    /// Tracking database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Recognition service reported a failure
    #[error("API error: {0}")]
    Api(String),

    /// Recognition service request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Could not reach the recognition service
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Invalid response from the recognition service
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Content hashing failed
    #[error("Hash computation failed: {0}")]
    HashFailed(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IngestError::Timeout
        } else if err.is_connect() {
            IngestError::ConnectionError(err.to_string())
        } else {
            IngestError::RequestFailed(err.to_string())
        }
    }
}
