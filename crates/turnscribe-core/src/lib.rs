//! turnscribe-core - 對話轉錄核心庫
//!
//! 提供共用資料類型與轉錄結果匯出功能。

pub mod exporter;
pub mod types;

pub use exporter::Exporter;
pub use types::*;
