//! ASR (Automatic Speech Recognition) provider contract
//!
//! This module defines the boundary to the recognition engine: the
//! provider trait, the raw result shape expected from the engine and a
//! mock implementation for testing pipelines without a real model.

pub mod error;
pub mod provider;
pub mod result;

pub use error::AsrError;
pub use provider::{MockRecognizer, RecognitionProvider};
pub use result::{parse_raw_result, RecognitionItem};
