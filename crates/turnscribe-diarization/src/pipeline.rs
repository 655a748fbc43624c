//! Dialogue processing pipeline

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use turnscribe_asr::{parse_raw_result, RecognitionProvider};
use turnscribe_core::{DialogueTurn, RunStage, RunSummary};
use turnscribe_punct::PunctuationProvider;

use crate::assembler::assemble_dialogue;
use crate::clusterer::SpeakerClusterer;
use crate::error::DiarizationError;
use crate::merger::merge_continuous_tokens;
use crate::provider::EmbeddingProvider;

/// Pipeline tuning options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizationOptions {
    /// Maximum silence between tokens that still merges, in milliseconds (inclusive)
    pub merge_gap_ms: u64,
    /// Cosine similarity a segment must exceed to join an existing speaker
    pub similarity_threshold: f32,
}

impl Default for DiarizationOptions {
    fn default() -> Self {
        Self {
            merge_gap_ms: 300,
            similarity_threshold: 0.7,
        }
    }
}

/// Pipeline progress information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineProgress {
    /// Current processing stage
    pub stage: RunStage,
    /// Progress fraction (0.0 - 1.0)
    pub fraction: f64,
}

/// Dialogue processing result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueResult {
    /// Punctuated turns in ascending start order
    pub turns: Vec<DialogueTurn>,
    /// Per-run statistics
    pub summary: RunSummary,
}

/// Dialogue processing pipeline
///
/// Drives one audio file through recognition, timestamp merging,
/// embedding extraction, speaker clustering and punctuation. Per-item
/// and per-segment failures degrade the output instead of aborting the
/// run; only a recognition call failure is fatal. A fresh clusterer is
/// created per run, so speaker labels never carry over between files.
pub struct Pipeline<R, E, P> {
    recognizer: R,
    embedder: E,
    punctuator: P,
    options: DiarizationOptions,
}

impl<R, E, P> Pipeline<R, E, P>
where
    R: RecognitionProvider,
    E: EmbeddingProvider,
    P: PunctuationProvider,
{
    /// Create a pipeline with default options
    pub fn new(recognizer: R, embedder: E, punctuator: P) -> Self {
        Self::with_options(recognizer, embedder, punctuator, DiarizationOptions::default())
    }

    /// Create a pipeline with custom options
    pub fn with_options(
        recognizer: R,
        embedder: E,
        punctuator: P,
        options: DiarizationOptions,
    ) -> Self {
        Self {
            recognizer,
            embedder,
            punctuator,
            options,
        }
    }

    /// Process one audio file into a speaker-attributed dialogue
    pub async fn process(&self, audio_path: &str) -> Result<DialogueResult, DiarizationError> {
        self.process_with_progress(audio_path, |_| {}).await
    }

    /// Process one audio file, reporting stage transitions
    pub async fn process_with_progress<F>(
        &self,
        audio_path: &str,
        progress: F,
    ) -> Result<DialogueResult, DiarizationError>
    where
        F: Fn(PipelineProgress),
    {
        let run_start = Instant::now();
        info!("Starting dialogue processing: {}", audio_path);
        progress(PipelineProgress {
            stage: RunStage::Started,
            fraction: 0.0,
        });

        // 1. Recognition
        progress(PipelineProgress {
            stage: RunStage::Recognizing,
            fraction: 0.1,
        });
        let raw = self
            .recognizer
            .recognize(audio_path)
            .await
            .map_err(|e| DiarizationError::RecognitionFailed(e.to_string()))?;
        let items = parse_raw_result(&raw);
        debug!("Recognition produced {} items", items.len());

        // 2. Merge tokens and extract embeddings
        progress(PipelineProgress {
            stage: RunStage::Merging,
            fraction: 0.3,
        });
        let mut segments = Vec::new();
        let mut segments_merged = 0usize;
        let mut segments_dropped = 0usize;

        for item in &items {
            let merged =
                merge_continuous_tokens(&item.timestamp, &item.text, self.options.merge_gap_ms);
            segments_merged += merged.len();

            for mut segment in merged {
                match self
                    .embedder
                    .extract(audio_path, segment.start, segment.end)
                    .await
                {
                    Ok(Some(embedding)) => {
                        segment.embedding = Some(embedding);
                        segments.push(segment);
                    }
                    Ok(None) => {
                        segments_dropped += 1;
                        warn!(
                            "No speaker embedding for segment {:.2}-{:.2}s, dropping it",
                            segment.start, segment.end
                        );
                    }
                    Err(e) => {
                        segments_dropped += 1;
                        warn!(
                            "Embedding extraction failed for segment {:.2}-{:.2}s, dropping it: {}",
                            segment.start, segment.end, e
                        );
                    }
                }
            }
        }
        debug!("Collected {} segments with embeddings", segments.len());

        // 3. Assign speaker labels in discovery order
        progress(PipelineProgress {
            stage: RunStage::Clustering,
            fraction: 0.6,
        });
        let mut clusterer = SpeakerClusterer::new(self.options.similarity_threshold);
        let mut labeled = Vec::with_capacity(segments.len());

        for segment in &segments {
            if let Some(embedding) = &segment.embedding {
                let speaker = clusterer.assign(embedding);
                labeled.push(DialogueTurn {
                    speaker,
                    text: segment.text.clone(),
                    start: segment.start,
                    end: segment.end,
                });
            }
        }
        let speakers = clusterer.speaker_count();

        // 4. Punctuate and assemble
        progress(PipelineProgress {
            stage: RunStage::Punctuating,
            fraction: 0.8,
        });
        let labeled_count = labeled.len();
        let turns = assemble_dialogue(&self.punctuator, labeled).await;
        let turns_dropped = labeled_count - turns.len();

        progress(PipelineProgress {
            stage: RunStage::Done,
            fraction: 1.0,
        });

        let summary = RunSummary {
            items: items.len(),
            segments: segments_merged,
            segments_dropped,
            turns_dropped,
            speakers,
            turns: turns.len(),
            elapsed_secs: run_start.elapsed().as_secs_f64(),
        };
        info!(
            "Dialogue processing completed in {:.2}s: {} turns, {} speakers",
            summary.elapsed_secs, summary.turns, summary.speakers
        );

        Ok(DialogueResult { turns, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;
    use turnscribe_asr::MockRecognizer;
    use turnscribe_punct::{MockPunctuator, PassthroughPunctuator};

    use crate::provider::MockEmbeddingExtractor;

    #[tokio::test]
    async fn test_process_end_to_end() {
        let recognizer = MockRecognizer::new().with_result(json!([
            {"text": "你好 世界 再見", "timestamp": [[0, 200], [250, 400], [800, 950]]},
            {"text": "好 的", "timestamp": [[1200, 1400], [1450, 1600]]},
        ]));
        let embedder = MockEmbeddingExtractor::new()
            .with_embedding(vec![1.0, 0.0, 0.0])
            .with_embedding(vec![0.9, 0.1, 0.0])
            .with_embedding(vec![0.0, 1.0, 0.0]);
        let punctuator = MockPunctuator::new()
            .with_rewrite("你好 世界", "你好，世界。")
            .with_rewrite("再見", "再見。")
            .with_rewrite("好 的", "好的。");

        let pipeline = Pipeline::new(recognizer, embedder, punctuator);
        let result = pipeline.process("meeting.wav").await.unwrap();

        assert_eq!(result.turns.len(), 3);
        assert_eq!(result.turns[0].speaker, "Speaker_1");
        assert_eq!(result.turns[0].text, "你好，世界。");
        assert_eq!(result.turns[1].speaker, "Speaker_1");
        assert_eq!(result.turns[2].speaker, "Speaker_2");
        assert_eq!(result.turns[2].text, "好的。");

        let starts: Vec<f64> = result.turns.iter().map(|t| t.start).collect();
        assert!(starts.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(result.summary.items, 2);
        assert_eq!(result.summary.segments, 3);
        assert_eq!(result.summary.segments_dropped, 0);
        assert_eq!(result.summary.turns_dropped, 0);
        assert_eq!(result.summary.speakers, 2);
        assert_eq!(result.summary.turns, 3);
    }

    #[tokio::test]
    async fn test_recognition_failure_is_fatal() {
        let pipeline = Pipeline::new(
            MockRecognizer::new().with_failure(),
            MockEmbeddingExtractor::new(),
            PassthroughPunctuator::new(),
        );

        let result = pipeline.process("meeting.wav").await;
        assert!(matches!(
            result,
            Err(DiarizationError::RecognitionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_result_shape_degrades_to_empty() {
        let pipeline = Pipeline::new(
            MockRecognizer::new().with_result(json!({"status": "error"})),
            MockEmbeddingExtractor::new(),
            PassthroughPunctuator::new(),
        );

        let result = pipeline.process("meeting.wav").await.unwrap();

        assert!(result.turns.is_empty());
        assert_eq!(result.summary.items, 0);
        assert_eq!(result.summary.speakers, 0);
    }

    #[tokio::test]
    async fn test_count_mismatch_degrades_item_to_zero_segments() {
        let recognizer = MockRecognizer::new().with_result(json!([
            {"text": "a b c", "timestamp": [[0, 200], [250, 400]]},
            {"text": "d", "timestamp": [[1000, 1200]]},
        ]));
        let embedder = MockEmbeddingExtractor::new().with_embedding(vec![1.0, 0.0]);

        let pipeline = Pipeline::new(recognizer, embedder, PassthroughPunctuator::new());
        let result = pipeline.process("meeting.wav").await.unwrap();

        assert_eq!(result.summary.items, 2);
        assert_eq!(result.summary.segments, 1);
        assert_eq!(result.turns.len(), 1);
        assert_eq!(result.turns[0].text, "d");
    }

    #[tokio::test]
    async fn test_embedding_failure_drops_only_that_segment() {
        let recognizer = MockRecognizer::new().with_result(json!([
            {"text": "a b", "timestamp": [[0, 100], [900, 1000]]},
        ]));
        let embedder = MockEmbeddingExtractor::new()
            .with_failure()
            .with_embedding(vec![1.0, 0.0]);

        let pipeline = Pipeline::new(recognizer, embedder, PassthroughPunctuator::new());
        let result = pipeline.process("meeting.wav").await.unwrap();

        assert_eq!(result.summary.segments, 2);
        assert_eq!(result.summary.segments_dropped, 1);
        assert_eq!(result.turns.len(), 1);
        assert_eq!(result.turns[0].text, "b");
        assert_eq!(result.turns[0].speaker, "Speaker_1");
    }

    #[tokio::test]
    async fn test_missing_embedding_drops_only_that_segment() {
        let recognizer = MockRecognizer::new().with_result(json!([
            {"text": "a b", "timestamp": [[0, 100], [900, 1000]]},
        ]));
        let embedder = MockEmbeddingExtractor::new()
            .with_missing()
            .with_embedding(vec![1.0, 0.0]);

        let pipeline = Pipeline::new(recognizer, embedder, PassthroughPunctuator::new());
        let result = pipeline.process("meeting.wav").await.unwrap();

        assert_eq!(result.summary.segments_dropped, 1);
        assert_eq!(result.turns.len(), 1);
    }

    #[tokio::test]
    async fn test_punctuation_failure_drops_only_that_turn() {
        let recognizer = MockRecognizer::new().with_result(json!([
            {"text": "a b", "timestamp": [[0, 100], [900, 1000]]},
        ]));
        let embedder = MockEmbeddingExtractor::new()
            .with_embedding(vec![1.0, 0.0])
            .with_embedding(vec![0.95, 0.05]);
        let punctuator = MockPunctuator::new().with_failure_on("a");

        let pipeline = Pipeline::new(recognizer, embedder, punctuator);
        let result = pipeline.process("meeting.wav").await.unwrap();

        assert_eq!(result.summary.turns_dropped, 1);
        assert_eq!(result.turns.len(), 1);
        assert_eq!(result.turns[0].text, "b");
    }

    #[tokio::test]
    async fn test_progress_reports_stages_in_order() {
        let pipeline = Pipeline::new(
            MockRecognizer::new(),
            MockEmbeddingExtractor::new(),
            PassthroughPunctuator::new(),
        );

        let stages = Mutex::new(Vec::new());
        pipeline
            .process_with_progress("meeting.wav", |p| stages.lock().unwrap().push(p.stage))
            .await
            .unwrap();

        assert_eq!(
            stages.into_inner().unwrap(),
            vec![
                RunStage::Started,
                RunStage::Recognizing,
                RunStage::Merging,
                RunStage::Clustering,
                RunStage::Punctuating,
                RunStage::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_custom_options_are_applied() {
        // Gap of 500ms merges with a 600ms threshold but splits by default
        let recognizer = MockRecognizer::new().with_result(json!([
            {"text": "a b", "timestamp": [[0, 100], [600, 700]]},
        ]));
        let embedder = MockEmbeddingExtractor::new().with_embedding(vec![1.0, 0.0]);

        let options = DiarizationOptions {
            merge_gap_ms: 600,
            similarity_threshold: 0.7,
        };
        let pipeline =
            Pipeline::with_options(recognizer, embedder, PassthroughPunctuator::new(), options);
        let result = pipeline.process("meeting.wav").await.unwrap();

        assert_eq!(result.summary.segments, 1);
        assert_eq!(result.turns[0].text, "a b");
    }
}
