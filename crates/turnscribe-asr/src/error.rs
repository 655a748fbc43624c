//! ASR error types

use thiserror::Error;

/// ASR-related errors
#[derive(Error, Debug)]
pub enum AsrError {
    /// Recognition failed
    #[error("Recognition failed: {0}")]
    RecognitionFailed(String),

    /// File not found
    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    /// Invalid recognition result
    #[error("Invalid recognition result: {0}")]
    InvalidResult(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
