//! Status 與 logs 子命令

use std::path::Path;

use anyhow::Result;

use turnscribe_ingest::{FileStatus, IngestStore};

pub fn run_status(db: &Path, status: Option<FileStatus>) -> Result<()> {
    let store = IngestStore::open(db)?;
    let files = store.list_files(status)?;

    if files.is_empty() {
        println!("No tracked audio files");
        return Ok(());
    }

    for file in files {
        println!(
            "{:>4}  {:<10}  {:>12}  {}",
            file.id, file.status, file.file_size, file.file_path
        );
    }
    Ok(())
}

pub fn run_logs(db: &Path, file_id: i64) -> Result<()> {
    let store = IngestStore::open(db)?;
    let Some(record) = store.get_file(file_id)? else {
        anyhow::bail!("no tracked file with id {}", file_id);
    };

    println!("{} ({})", record.file_path, record.status);
    for log in store.file_logs(file_id)? {
        println!("{}  [{}]  {}", log.created_at, log.log_level, log.message);
    }
    Ok(())
}
