//! Scan 子命令

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use turnscribe_ingest::{run_scan, FileProcessor, HttpRecognizer, IngestStore};

pub async fn run(db: &Path, directory: &Path, endpoint: &str) -> Result<()> {
    let store = Arc::new(IngestStore::open(db)?);
    let processor = FileProcessor::new(store, HttpRecognizer::with_endpoint(endpoint));

    let report = run_scan(&processor, directory).await;
    println!(
        "{} audio files found: {} processed, {} skipped, {} failed",
        report.discovered, report.processed, report.skipped, report.failed
    );
    Ok(())
}
