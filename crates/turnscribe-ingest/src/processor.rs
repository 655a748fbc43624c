//! Single-file processing workflow

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dispatch::Recognizer;
use crate::error::IngestError;
use crate::hash::file_sha256;
use crate::store::{FileStatus, IngestStore};

/// Outcome of processing one audio file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// File already tracked, nothing to do
    Skipped,
    /// Processed and results saved
    Completed(i64),
    /// Recorded but the recognition service failed
    Failed(i64),
}

/// Drives one audio file through hashing, dedup, recognition and persistence
pub struct FileProcessor<R> {
    store: Arc<IngestStore>,
    recognizer: R,
}

impl<R> FileProcessor<R>
where
    R: Recognizer,
{
    /// Create a processor over a shared tracking store
    pub fn new(store: Arc<IngestStore>, recognizer: R) -> Self {
        Self { store, recognizer }
    }

    /// Process a single audio file
    ///
    /// Already-tracked files (same path or same content hash) are
    /// skipped. A tracked path short-circuits before hashing, so
    /// repeated scans of the same directory never re-read content;
    /// unseen paths are hashed to catch the same recording under a new
    /// name. A recognition failure marks the record failed and is not
    /// an error here; only hashing and database problems propagate.
    pub async fn process_file(&self, path: &Path) -> Result<ProcessOutcome, IngestError> {
        let path_str = path.to_string_lossy();

        if self.store.find_by_path(&path_str)?.is_some() {
            debug!("File already processed: {}", path.display());
            return Ok(ProcessOutcome::Skipped);
        }

        let file_hash = file_sha256(path).await?;
        if self.store.find_file(&path_str, &file_hash)?.is_some() {
            info!("File already processed: {}", path.display());
            return Ok(ProcessOutcome::Skipped);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_str.to_string());
        let file_size = tokio::fs::metadata(path).await?.len();

        let file_id = self
            .store
            .insert_file(&path_str, &file_name, file_size, &file_hash)?;
        self.store
            .update_status(file_id, FileStatus::Processing, Some("Started processing"))?;

        match self.recognizer.recognize(&path_str).await {
            Ok(turns) => {
                self.store.save_results(file_id, &turns)?;
                self.store.update_status(
                    file_id,
                    FileStatus::Completed,
                    Some("Processing completed successfully"),
                )?;
                info!("Successfully processed: {}", path.display());
                Ok(ProcessOutcome::Completed(file_id))
            }
            Err(e) => {
                let message = match &e {
                    IngestError::Api(_) | IngestError::RequestFailed(_) => e.to_string(),
                    other => format!("Processing error: {}", other),
                };
                self.store
                    .update_status(file_id, FileStatus::Failed, Some(&message))?;
                warn!("Failed to process {}: {}", path.display(), message);
                Ok(ProcessOutcome::Failed(file_id))
            }
        }
    }
}
