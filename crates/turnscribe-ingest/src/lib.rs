//! turnscribe-ingest - audio file ingestion and processing dispatch
//!
//! Watches directories for audio files, tracks them in a SQLite
//! database with content-hash dedup, submits each new file to a
//! recognition service and stores the returned dialogue turns.

pub mod dispatch;
pub mod error;
pub mod hash;
pub mod processor;
pub mod scanner;
pub mod schema;
pub mod store;

pub use dispatch::{HttpRecognizer, MockRecognizer, Recognizer, DEFAULT_ENDPOINT};
pub use error::IngestError;
pub use hash::file_sha256;
pub use processor::{FileProcessor, ProcessOutcome};
pub use scanner::{
    is_audio_file, run_scan, scan_audio_files, watch_directory, ScanReport, AUDIO_EXTENSIONS,
};
pub use store::{AudioFileRecord, FileStatus, IngestStore, LogRecord};
