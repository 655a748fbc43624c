//! Speaker embedding provider trait and mock implementation

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::DiarizationError;

/// Speaker embedding provider trait
///
/// Implementations wrap a speaker verification engine and extract a
/// fixed-dimension voice embedding for one time span of an audio file.
/// `Ok(None)` means the engine produced no usable vector for the span;
/// callers treat `None` and `Err` the same way and drop the segment.
#[trait_variant::make(EmbeddingProvider: Send)]
pub trait LocalEmbeddingProvider {
    /// Extract a voice embedding for the given time span
    async fn extract(
        &self,
        audio_path: &str,
        start_sec: f64,
        end_sec: f64,
    ) -> Result<Option<Vec<f32>>, DiarizationError>;

    /// Get provider name
    fn name(&self) -> &'static str;
}

enum MockExtraction {
    Embedding(Vec<f32>),
    Missing,
    Failure,
}

/// Mock embedding extractor for testing
///
/// Scripted responses are consumed in call order; once exhausted,
/// further calls return `Ok(None)`.
#[derive(Default)]
pub struct MockEmbeddingExtractor {
    responses: Mutex<VecDeque<MockExtraction>>,
}

impl MockEmbeddingExtractor {
    /// Create a new mock extractor with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an embedding for the next extraction
    pub fn with_embedding(self, embedding: Vec<f32>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockExtraction::Embedding(embedding));
        self
    }

    /// Queue a "no usable vector" response for the next extraction
    pub fn with_missing(self) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockExtraction::Missing);
        self
    }

    /// Queue a failure for the next extraction
    pub fn with_failure(self) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockExtraction::Failure);
        self
    }
}

impl EmbeddingProvider for MockEmbeddingExtractor {
    async fn extract(
        &self,
        _audio_path: &str,
        _start_sec: f64,
        _end_sec: f64,
    ) -> Result<Option<Vec<f32>>, DiarizationError> {
        match self.responses.lock().unwrap().pop_front() {
            Some(MockExtraction::Embedding(embedding)) => Ok(Some(embedding)),
            Some(MockExtraction::Missing) | None => Ok(None),
            Some(MockExtraction::Failure) => Err(DiarizationError::EmbeddingFailed(
                "mock extraction failure".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
