//! Directory scanning and watching

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::dispatch::Recognizer;
use crate::processor::{FileProcessor, ProcessOutcome};

/// Audio file extensions picked up by the scanner
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac"];

/// Check whether a path looks like a supported audio file
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect all audio files under a directory, recursively
pub fn scan_audio_files(directory: &Path) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_audio_file(path))
        .collect()
}

/// Counts from one scan pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub discovered: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Process every audio file currently under a directory
pub async fn run_scan<R>(processor: &FileProcessor<R>, directory: &Path) -> ScanReport
where
    R: Recognizer,
{
    let files = scan_audio_files(directory);
    let mut report = ScanReport {
        discovered: files.len(),
        ..ScanReport::default()
    };

    for path in files {
        match processor.process_file(&path).await {
            Ok(ProcessOutcome::Completed(_)) => report.processed += 1,
            Ok(ProcessOutcome::Skipped) => report.skipped += 1,
            Ok(ProcessOutcome::Failed(_)) => report.failed += 1,
            Err(e) => {
                report.failed += 1;
                warn!("Error processing {}: {}", path.display(), e);
            }
        }
    }

    report
}

/// Watch a directory, processing audio files as they appear
///
/// Runs an initial scan, then re-scans at the given interval. Files
/// already tracked are skipped by the dedup check, so each pass only
/// picks up new arrivals. Runs until the surrounding task is cancelled.
pub async fn watch_directory<R>(
    processor: &FileProcessor<R>,
    directory: &Path,
    poll_interval: Duration,
) where
    R: Recognizer,
{
    info!("Scanning existing files in {}", directory.display());
    let report = run_scan(processor, directory).await;
    info!(
        "Initial scan complete: {} found, {} processed, {} skipped, {} failed",
        report.discovered, report.processed, report.skipped, report.failed
    );

    info!(
        "Watching {} (poll interval {:?})",
        directory.display(),
        poll_interval
    );
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let report = run_scan(processor, directory).await;
        if report.processed > 0 || report.failed > 0 {
            debug!(
                "Re-scan picked up {} new files ({} failed)",
                report.processed, report.failed
            );
        }
    }
}
