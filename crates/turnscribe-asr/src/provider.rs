//! Recognition provider trait and mock implementation

use serde_json::Value;

use crate::error::AsrError;

/// Recognition provider trait
///
/// Implementations wrap a speech recognition engine and return its raw
/// output as JSON: an ordered array of items, each carrying `text`
/// (whitespace-tokenizable) and `timestamp` (ordered `[start_ms, end_ms]`
/// pairs, one per token). The shape is validated downstream by
/// [`crate::result::parse_raw_result`].
#[trait_variant::make(RecognitionProvider: Send)]
pub trait LocalRecognitionProvider {
    /// Run recognition on an audio file
    async fn recognize(&self, audio_path: &str) -> Result<Value, AsrError>;

    /// Get provider name
    fn name(&self) -> &'static str;
}

/// Mock recognizer for testing
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    result: Option<Value>,
    should_fail: bool,
}

impl MockRecognizer {
    /// Create a new mock recognizer returning an empty result array
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to return a specific raw result
    pub fn with_result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }

    /// Configure the mock to fail on recognize
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl RecognitionProvider for MockRecognizer {
    async fn recognize(&self, _audio_path: &str) -> Result<Value, AsrError> {
        if self.should_fail {
            Err(AsrError::RecognitionFailed(
                "mock recognition failure".to_string(),
            ))
        } else {
            Ok(self.result.clone().unwrap_or_else(|| Value::Array(vec![])))
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
