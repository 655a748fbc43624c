//! Punctuation provider trait and mock implementation

use std::collections::{HashMap, HashSet};

use crate::error::PunctError;

/// Punctuation provider trait
#[trait_variant::make(PunctuationProvider: Send)]
pub trait LocalPunctuationProvider {
    /// Restore punctuation for a piece of unpunctuated text
    async fn punctuate(&self, text: &str) -> Result<String, PunctError>;

    /// Get provider name
    fn name(&self) -> &'static str;
}

/// Mock punctuator for testing
///
/// Inputs registered via [`MockPunctuator::with_rewrite`] are replaced by
/// their configured output; inputs registered via
/// [`MockPunctuator::with_failure_on`] fail; everything else passes
/// through unchanged.
#[derive(Debug, Clone, Default)]
pub struct MockPunctuator {
    rewrites: HashMap<String, String>,
    failures: HashSet<String>,
}

impl MockPunctuator {
    /// Create a new mock punctuator that passes text through unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a fixed rewrite for a specific input
    pub fn with_rewrite(mut self, input: &str, output: &str) -> Self {
        self.rewrites.insert(input.to_string(), output.to_string());
        self
    }

    /// Configure the mock to fail for a specific input
    pub fn with_failure_on(mut self, input: &str) -> Self {
        self.failures.insert(input.to_string());
        self
    }
}

impl PunctuationProvider for MockPunctuator {
    async fn punctuate(&self, text: &str) -> Result<String, PunctError> {
        if self.failures.contains(text) {
            return Err(PunctError::PunctuationFailed(
                "mock punctuation failure".to_string(),
            ));
        }

        Ok(self
            .rewrites
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
