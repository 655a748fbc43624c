//! Diarization error types

use thiserror::Error;

/// Diarization-related errors
#[derive(Error, Debug)]
pub enum DiarizationError {
    /// Recognition collaborator failed
    #[error("Recognition failed: {0}")]
    RecognitionFailed(String),

    /// Embedding extraction failed
    #[error("Embedding extraction failed: {0}")]
    EmbeddingFailed(String),

    /// File not found
    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
