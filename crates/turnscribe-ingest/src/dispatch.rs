//! Recognition service dispatch

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use turnscribe_core::DialogueTurn;

use crate::error::IngestError;

/// Default recognition service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/recognize";

/// Recognition service trait
///
/// Implementations submit one audio file to the dialogue processing
/// service and return the finished speaker-attributed turns.
#[trait_variant::make(Recognizer: Send)]
pub trait LocalRecognizer {
    /// Submit an audio file for processing
    async fn recognize(&self, audio_path: &str) -> Result<Vec<DialogueTurn>, IngestError>;

    /// Get service name
    fn name(&self) -> &'static str;
}

/// HTTP client for the recognition service
pub struct HttpRecognizer {
    client: Client,
    endpoint: String,
}

impl HttpRecognizer {
    /// Create a client for the default endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a client for a custom endpoint
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

impl Default for HttpRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for HttpRecognizer {
    async fn recognize(&self, audio_path: &str) -> Result<Vec<DialogueTurn>, IngestError> {
        debug!("Submitting {} to {}", audio_path, self.endpoint);

        let request = RecognizeRequest { audio_path };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Recognition service error: {} - {}", status, error_text);
            return Err(IngestError::RequestFailed(error_text));
        }

        let body: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| IngestError::InvalidResponse(e.to_string()))?;

        if body.status != "success" {
            let message = body
                .message
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Err(IngestError::Api(message));
        }

        Ok(body.data.unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Mock recognition service for testing
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    turns: Vec<DialogueTurn>,
    should_fail: bool,
}

impl MockRecognizer {
    /// Create a mock that returns no turns
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the turns the mock returns
    pub fn with_turns(mut self, turns: Vec<DialogueTurn>) -> Self {
        self.turns = turns;
        self
    }

    /// Configure the mock to fail on recognize
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Recognizer for MockRecognizer {
    async fn recognize(&self, _audio_path: &str) -> Result<Vec<DialogueTurn>, IngestError> {
        if self.should_fail {
            Err(IngestError::Api("mock service failure".to_string()))
        } else {
            Ok(self.turns.clone())
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    audio_path: &'a str,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Vec<DialogueTurn>>,
}

#[cfg(test)]
mod tests {
    use super::{HttpRecognizer, MockRecognizer, RecognizeResponse, Recognizer, DEFAULT_ENDPOINT};
    use crate::error::IngestError;
    use turnscribe_core::DialogueTurn;

    #[test]
    fn test_default_endpoint() {
        let recognizer = HttpRecognizer::new();
        assert_eq!(recognizer.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_response_parsing() {
        let body: RecognizeResponse = serde_json::from_str(
            r#"{"status": "success", "data": [{"speaker": "Speaker_1", "text": "你好。", "start": 0.0, "end": 1.2}]}"#,
        )
        .unwrap();

        assert_eq!(body.status, "success");
        let data = body.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].speaker, "Speaker_1");
    }

    #[test]
    fn test_error_response_parsing() {
        let body: RecognizeResponse =
            serde_json::from_str(r#"{"status": "error", "message": "no such file"}"#).unwrap();

        assert_eq!(body.status, "error");
        assert_eq!(body.message.as_deref(), Some("no such file"));
        assert!(body.data.is_none());
    }

    #[tokio::test]
    async fn test_mock_returns_configured_turns() {
        let recognizer = MockRecognizer::new().with_turns(vec![DialogueTurn {
            speaker: "Speaker_1".to_string(),
            text: "你好。".to_string(),
            start: 0.0,
            end: 1.2,
        }]);

        let turns = recognizer.recognize("a.wav").await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].text, "你好。");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let recognizer = MockRecognizer::new().with_failure();
        let result = recognizer.recognize("a.wav").await;
        assert!(matches!(result, Err(IngestError::Api(_))));
    }
}
