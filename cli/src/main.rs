//! Turnscribe 命令列工具
//!
//! 掃描與監看音訊目錄，將檔案送交辨識服務並管理追蹤資料庫

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use turnscribe_ingest::FileStatus;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "turnscribe",
    version,
    about = "Audio ingestion and dialogue transcription pipeline"
)]
struct Cli {
    /// Path to the tracking database
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        default_value = "turnscribe.db"
    )]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process every audio file under a directory once
    Scan {
        /// Directory to scan recursively
        directory: PathBuf,

        /// Recognition service endpoint
        #[arg(long, value_name = "URL", default_value = turnscribe_ingest::DEFAULT_ENDPOINT)]
        endpoint: String,
    },

    /// Watch a directory and process new audio files as they appear
    Watch {
        /// Directory to watch
        directory: PathBuf,

        /// Recognition service endpoint
        #[arg(long, value_name = "URL", default_value = turnscribe_ingest::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Re-scan interval in seconds
        #[arg(long, value_name = "SECONDS", default_value = "5")]
        interval: u64,
    },

    /// List tracked files and their status
    Status {
        /// Only show files with this status (pending, processing, completed, failed)
        #[arg(long, value_name = "STATUS")]
        status: Option<FileStatus>,
    },

    /// Show processing logs for one tracked file
    Logs {
        /// Tracked file id
        id: i64,
    },

    /// Export saved dialogue results for one tracked file
    Export {
        /// Tracked file id
        id: i64,

        /// Write to a file instead of stdout
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日誌
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            directory,
            endpoint,
        } => commands::scan::run(&cli.db, &directory, &endpoint).await,
        Commands::Watch {
            directory,
            endpoint,
            interval,
        } => commands::watch::run(&cli.db, &directory, &endpoint, interval).await,
        Commands::Status { status } => commands::status::run_status(&cli.db, status),
        Commands::Logs { id } => commands::status::run_logs(&cli.db, id),
        Commands::Export { id, output, json } => {
            commands::export::run(&cli.db, id, output.as_deref(), json)
        }
    }
}
