//! Passthrough punctuator

use crate::error::PunctError;
use crate::provider::PunctuationProvider;

/// Punctuator that returns its input unchanged
///
/// Usable default for deployments without a punctuation model; the
/// dialogue output then carries the raw merged text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughPunctuator;

impl PassthroughPunctuator {
    /// Create a new passthrough punctuator
    pub fn new() -> Self {
        Self
    }
}

impl PunctuationProvider for PassthroughPunctuator {
    async fn punctuate(&self, text: &str) -> Result<String, PunctError> {
        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough_returns_input() {
        let punctuator = PassthroughPunctuator::new();
        let result = punctuator.punctuate("未加標點的文字").await.unwrap();
        assert_eq!(result, "未加標點的文字");
    }
}
