//! Ingestion tracking store
//!
//! SQLite-backed bookkeeping for discovered audio files, their
//! processing status, per-file logs and saved dialogue results.

use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use turnscribe_core::DialogueTurn;

use crate::error::IngestError;
use crate::schema;

/// Processing status of a tracked audio file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Discovered but not yet submitted
    Pending,
    /// Submitted to the recognition service
    Processing,
    /// Results saved
    Completed,
    /// Recognition or persistence failed
    Failed,
}

impl FileStatus {
    /// Status string as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Pending => "pending",
            FileStatus::Processing => "processing",
            FileStatus::Completed => "completed",
            FileStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FileStatus::Pending),
            "processing" => Ok(FileStatus::Processing),
            "completed" => Ok(FileStatus::Completed),
            "failed" => Ok(FileStatus::Failed),
            other => Err(format!("unknown file status: {}", other)),
        }
    }
}

/// One tracked audio file
#[derive(Debug, Clone, Serialize)]
pub struct AudioFileRecord {
    pub id: i64,
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_hash: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One per-file processing log entry
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub id: i64,
    pub audio_file_id: i64,
    pub log_level: String,
    pub message: String,
    pub created_at: String,
}

/// SQLite-backed ingestion store
///
/// Wraps a single connection behind a mutex; all access is serialized.
pub struct IngestStore {
    conn: Mutex<Connection>,
}

impl IngestStore {
    /// Open or create the tracking database at the given path
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self::initialize(conn)?;
        info!("Tracking database opened: {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn in_memory() -> Result<Self, IngestError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, IngestError> {
        conn.execute_batch(schema::PRAGMAS)?;
        conn.execute_batch(schema::CREATE_TABLES)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Look up a tracked file by path alone
    ///
    /// Cheap lookup for re-scan passes; a hit means the content hash
    /// is already recorded and the file does not need re-reading.
    pub fn find_by_path(&self, file_path: &str) -> Result<Option<i64>, IngestError> {
        let conn = self.conn.lock().unwrap();
        let id = conn
            .query_row(
                "SELECT id FROM audio_files WHERE file_path = ?1",
                params![file_path],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Look up a tracked file by path or content hash
    ///
    /// Matching either one means the file was already ingested, so a
    /// re-upload under a new name is still recognized as a duplicate.
    pub fn find_file(&self, file_path: &str, file_hash: &str) -> Result<Option<i64>, IngestError> {
        let conn = self.conn.lock().unwrap();
        let id = conn
            .query_row(
                "SELECT id FROM audio_files WHERE file_path = ?1 OR file_hash = ?2",
                params![file_path, file_hash],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Record a newly discovered file as pending
    pub fn insert_file(
        &self,
        file_path: &str,
        file_name: &str,
        file_size: u64,
        file_hash: &str,
    ) -> Result<i64, IngestError> {
        let now = Local::now().to_rfc3339();
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO audio_files (file_path, file_name, file_size, file_hash, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                file_path,
                file_name,
                file_size,
                file_hash,
                FileStatus::Pending.as_str(),
                now
            ],
        )?;
        let file_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO processing_logs (audio_file_id, log_level, message, created_at)
             VALUES (?1, 'info', 'File discovered and recorded', ?2)",
            params![file_id, now],
        )?;

        tx.commit()?;
        debug!("Recorded audio file {}: {}", file_id, file_path);
        Ok(file_id)
    }

    /// Update a file's status, optionally appending a log entry
    ///
    /// Log entries for the failed status are written at the error
    /// level, everything else at info.
    pub fn update_status(
        &self,
        file_id: i64,
        status: FileStatus,
        message: Option<&str>,
    ) -> Result<(), IngestError> {
        let now = Local::now().to_rfc3339();
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            "UPDATE audio_files SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), now, file_id],
        )?;

        if let Some(message) = message {
            let log_level = if status == FileStatus::Failed {
                "error"
            } else {
                "info"
            };
            tx.execute(
                "INSERT INTO processing_logs (audio_file_id, log_level, message, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![file_id, log_level, message, now],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Save dialogue results for a file, replacing any earlier ones
    pub fn save_results(&self, file_id: i64, turns: &[DialogueTurn]) -> Result<(), IngestError> {
        let now = Local::now().to_rfc3339();
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM voice_results WHERE audio_file_id = ?1",
            params![file_id],
        )?;

        for turn in turns {
            tx.execute(
                "INSERT INTO voice_results (audio_file_id, speaker_id, text_content, start_time, end_time)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![file_id, turn.speaker, turn.text, turn.start, turn.end],
            )?;
        }

        tx.execute(
            "INSERT INTO processing_logs (audio_file_id, log_level, message, created_at)
             VALUES (?1, 'info', 'Successfully processed voice results', ?2)",
            params![file_id, now],
        )?;

        tx.commit()?;
        debug!("Saved {} dialogue turns for file {}", turns.len(), file_id);
        Ok(())
    }

    /// Get one tracked file by id
    pub fn get_file(&self, file_id: i64) -> Result<Option<AudioFileRecord>, IngestError> {
        let conn = self.conn.lock().unwrap();
        let record = conn
            .query_row(
                "SELECT id, file_path, file_name, file_size, file_hash, status, created_at, updated_at
                 FROM audio_files WHERE id = ?1",
                params![file_id],
                |row| {
                    Ok(AudioFileRecord {
                        id: row.get(0)?,
                        file_path: row.get(1)?,
                        file_name: row.get(2)?,
                        file_size: row.get(3)?,
                        file_hash: row.get(4)?,
                        status: row.get(5)?,
                        created_at: row.get(6)?,
                        updated_at: row.get(7)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// List tracked files, optionally filtered by status
    pub fn list_files(
        &self,
        status: Option<FileStatus>,
    ) -> Result<Vec<AudioFileRecord>, IngestError> {
        let conn = self.conn.lock().unwrap();
        let map_row = |row: &rusqlite::Row<'_>| {
            Ok(AudioFileRecord {
                id: row.get(0)?,
                file_path: row.get(1)?,
                file_name: row.get(2)?,
                file_size: row.get(3)?,
                file_hash: row.get(4)?,
                status: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            })
        };

        let records = match status {
            Some(status) => {
                let mut stmt = conn.prepare(
                    "SELECT id, file_path, file_name, file_size, file_hash, status, created_at, updated_at
                     FROM audio_files WHERE status = ?1 ORDER BY id",
                )?;
                let rows = stmt.query_map(params![status.as_str()], map_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, file_path, file_name, file_size, file_hash, status, created_at, updated_at
                     FROM audio_files ORDER BY id",
                )?;
                let rows = stmt.query_map([], map_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(records)
    }

    /// List log entries for one file in insertion order
    pub fn file_logs(&self, file_id: i64) -> Result<Vec<LogRecord>, IngestError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, audio_file_id, log_level, message, created_at
             FROM processing_logs WHERE audio_file_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![file_id], |row| {
            Ok(LogRecord {
                id: row.get(0)?,
                audio_file_id: row.get(1)?,
                log_level: row.get(2)?,
                message: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Load saved dialogue turns for one file, ordered by start time
    pub fn results_for(&self, file_id: i64) -> Result<Vec<DialogueTurn>, IngestError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT speaker_id, text_content, start_time, end_time
             FROM voice_results WHERE audio_file_id = ?1 ORDER BY start_time",
        )?;
        let rows = stmt.query_map(params![file_id], |row| {
            Ok(DialogueTurn {
                speaker: row.get(0)?,
                text: row.get(1)?,
                start: row.get(2)?,
                end: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
