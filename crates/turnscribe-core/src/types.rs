//! 共用類型定義

use serde::{Deserialize, Serialize};

/// 識別引擎輸出的單一詞元
///
/// 僅在合併階段短暫存在，合併完成後即轉為 [`Segment`]。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// 詞元文字
    pub text: String,
    /// 開始時間（毫秒）
    pub start_ms: u64,
    /// 結束時間（毫秒）
    pub end_ms: u64,
}

/// 合併後的語音段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// 文字內容
    pub text: String,
    /// 開始時間（秒）
    pub start: f64,
    /// 結束時間（秒）
    pub end: f64,
    /// 說話人特徵向量，擷取失敗時為 None
    pub embedding: Option<Vec<f32>>,
}

impl Segment {
    /// 計算語音段的時長（秒）
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// 最終輸出的對話輪
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueTurn {
    /// 說話人標籤（例如 "Speaker_1"）
    pub speaker: String,
    /// 加上標點後的文字
    pub text: String,
    /// 開始時間（秒）
    pub start: f64,
    /// 結束時間（秒）
    pub end: f64,
}

impl DialogueTurn {
    /// 將對話輪格式化為單行文字
    pub fn format_line(&self) -> String {
        format!(
            "[{}]({:.2}-{:.2}s): {}",
            self.speaker, self.start, self.end, self.text
        )
    }
}

/// 管線處理階段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    /// 處理開始
    Started,
    /// 語音識別中
    Recognizing,
    /// 合併時間戳中
    Merging,
    /// 說話人聚類中
    Clustering,
    /// 標點處理與組裝中
    Punctuating,
    /// 處理完成
    Done,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStage::Started => write!(f, "started"),
            RunStage::Recognizing => write!(f, "recognizing"),
            RunStage::Merging => write!(f, "merging"),
            RunStage::Clustering => write!(f, "clustering"),
            RunStage::Punctuating => write!(f, "punctuating"),
            RunStage::Done => write!(f, "done"),
        }
    }
}

/// 單次處理的統計摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// 識別結果項目數
    pub items: usize,
    /// 合併產生的語音段數
    pub segments: usize,
    /// 因特徵擷取失敗而捨棄的語音段數
    pub segments_dropped: usize,
    /// 因標點處理失敗而捨棄的對話輪數
    pub turns_dropped: usize,
    /// 偵測到的說話人數
    pub speakers: usize,
    /// 最終對話輪數
    pub turns: usize,
    /// 總耗時（秒）
    pub elapsed_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let turn = DialogueTurn {
            speaker: "Speaker_1".to_string(),
            text: "你好，今天天氣不錯。".to_string(),
            start: 0.0,
            end: 2.456,
        };
        assert_eq!(
            turn.format_line(),
            "[Speaker_1](0.00-2.46s): 你好，今天天氣不錯。"
        );
    }

    #[test]
    fn test_segment_duration() {
        let segment = Segment {
            text: "hello".to_string(),
            start: 1.0,
            end: 3.5,
            embedding: None,
        };
        assert!((segment.duration() - 2.5).abs() < 0.001);
    }

    #[test]
    fn test_run_stage_display() {
        assert_eq!(RunStage::Started.to_string(), "started");
        assert_eq!(RunStage::Punctuating.to_string(), "punctuating");
        assert_eq!(RunStage::Done.to_string(), "done");
    }
}
