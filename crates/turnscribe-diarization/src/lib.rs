//! Speaker diarization pipeline
//!
//! This module turns raw recognition output into a speaker-attributed
//! dialogue: token timestamps are merged into continuous segments,
//! each segment's voice embedding is matched against known speakers by
//! online cosine-similarity clustering, punctuation is restored per
//! segment and the surviving turns are assembled in time order.

pub mod assembler;
pub mod clusterer;
pub mod error;
pub mod merger;
pub mod pipeline;
pub mod provider;

pub use assembler::assemble_dialogue;
pub use clusterer::{SpeakerClusterer, SpeakerProfile};
pub use error::DiarizationError;
pub use merger::merge_continuous_tokens;
pub use pipeline::{DialogueResult, DiarizationOptions, Pipeline, PipelineProgress};
pub use provider::{EmbeddingProvider, MockEmbeddingExtractor};

// Re-export types from turnscribe-core
pub use turnscribe_core::{DialogueTurn, RunStage, RunSummary, Segment};
