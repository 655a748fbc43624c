//! 轉錄結果匯出模組

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use crate::types::DialogueTurn;

/// 匯出錯誤
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO 錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化錯誤: {0}")]
    Json(#[from] serde_json::Error),
}

/// 轉錄結果匯出器
pub struct Exporter;

impl Exporter {
    /// 將對話輪渲染為純文字，每輪一行
    pub fn render_text(turns: &[DialogueTurn]) -> String {
        let mut content = String::new();
        for turn in turns {
            content.push_str(&turn.format_line());
            content.push('\n');
        }
        content
    }

    /// 匯出純文字檔
    pub fn to_text<P: AsRef<Path>>(
        turns: &[DialogueTurn],
        output_path: P,
    ) -> Result<(), ExportError> {
        let output_path = output_path.as_ref();

        // 確保目錄存在
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(output_path, Self::render_text(turns))?;
        tracing::debug!("已匯出 {} 條對話記錄至 {}", turns.len(), output_path.display());
        Ok(())
    }

    /// 將對話輪渲染為 JSON 字串
    pub fn render_json(turns: &[DialogueTurn], pretty: bool) -> Result<String, ExportError> {
        let data = JsonTranscript::from_turns(turns);

        let json = if pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };

        Ok(json)
    }

    /// 匯出 JSON 檔
    pub fn to_json<P: AsRef<Path>>(
        turns: &[DialogueTurn],
        output_path: P,
        pretty: bool,
    ) -> Result<(), ExportError> {
        let output_path = output_path.as_ref();

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(output_path, Self::render_json(turns, pretty)?)?;
        tracing::debug!("已匯出 {} 條對話記錄至 {}", turns.len(), output_path.display());
        Ok(())
    }
}

/// JSON 轉錄結構
#[derive(Serialize)]
struct JsonTranscript {
    version: String,
    generated_at: String,
    turn_count: usize,
    speaker_count: usize,
    turns: Vec<DialogueTurn>,
}

impl JsonTranscript {
    fn from_turns(turns: &[DialogueTurn]) -> Self {
        let speakers: HashSet<&str> = turns.iter().map(|t| t.speaker.as_str()).collect();

        Self {
            version: "1.0".to_string(),
            generated_at: Local::now().to_rfc3339(),
            turn_count: turns.len(),
            speaker_count: speakers.len(),
            turns: turns.to_vec(),
        }
    }
}
