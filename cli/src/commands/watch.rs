//! Watch 子命令

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use turnscribe_ingest::{watch_directory, FileProcessor, HttpRecognizer, IngestStore};

pub async fn run(db: &Path, directory: &Path, endpoint: &str, interval_secs: u64) -> Result<()> {
    let store = Arc::new(IngestStore::open(db)?);
    let processor = FileProcessor::new(store, HttpRecognizer::with_endpoint(endpoint));
    let poll_interval = Duration::from_secs(interval_secs);

    tokio::select! {
        _ = watch_directory(&processor, directory, poll_interval) => {}
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nReceived SIGINT, shutting down...");
        }
    }
    Ok(())
}
