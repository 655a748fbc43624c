//! Punctuation error types

use thiserror::Error;

/// Punctuation-related errors
#[derive(Error, Debug)]
pub enum PunctError {
    /// Punctuation restoration failed
    #[error("Punctuation failed: {0}")]
    PunctuationFailed(String),

    /// Engine not available
    #[error("Punctuation engine not available: {0}")]
    EngineUnavailable(String),
}
