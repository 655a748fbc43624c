//! Raw recognition result parsing

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One item of a recognition result
///
/// `text` tokenizes on whitespace; `timestamp` holds one `[start_ms, end_ms]`
/// pair per token. The counts are not required to match here; the merger
/// checks cardinality per item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionItem {
    /// Recognized text
    #[serde(default)]
    pub text: String,
    /// Token timestamps in milliseconds
    pub timestamp: Vec<(u64, u64)>,
}

/// Validate the shape of a raw recognition result
///
/// The engine is expected to return an array of objects, each exposing
/// `text` and `timestamp`. A non-array result is logged and yields zero
/// items; entries without a `timestamp` field are skipped silently and
/// otherwise malformed entries are logged and skipped. Never fails.
pub fn parse_raw_result(raw: &Value) -> Vec<RecognitionItem> {
    let Some(entries) = raw.as_array() else {
        warn!("Invalid recognition result format, expected an array");
        return Vec::new();
    };

    let mut items = Vec::new();
    for entry in entries {
        if !entry.is_object() || entry.get("timestamp").is_none() {
            continue;
        }

        match serde_json::from_value::<RecognitionItem>(entry.clone()) {
            Ok(item) => items.push(item),
            Err(e) => warn!("Skipping malformed recognition item: {}", e),
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_result() {
        let raw = json!([
            {"text": "a b c", "timestamp": [[0, 200], [250, 400], [800, 950]]},
            {"text": "d", "timestamp": [[1200, 1500]]},
        ]);

        let items = parse_raw_result(&raw);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "a b c");
        assert_eq!(items[0].timestamp, vec![(0, 200), (250, 400), (800, 950)]);
        assert_eq!(items[1].timestamp.len(), 1);
    }

    #[test]
    fn test_parse_non_array_yields_nothing() {
        assert!(parse_raw_result(&json!({"text": "a"})).is_empty());
        assert!(parse_raw_result(&json!("oops")).is_empty());
        assert!(parse_raw_result(&Value::Null).is_empty());
    }

    #[test]
    fn test_parse_skips_items_without_timestamp() {
        let raw = json!([
            {"text": "no timestamps here"},
            {"text": "ok", "timestamp": [[0, 100]]},
            42,
        ]);

        let items = parse_raw_result(&raw);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "ok");
    }

    #[test]
    fn test_parse_skips_malformed_timestamp_pairs() {
        let raw = json!([
            {"text": "bad", "timestamp": [[0, 100, 200]]},
            {"text": "also bad", "timestamp": "not a list"},
        ]);

        assert!(parse_raw_result(&raw).is_empty());
    }

    #[test]
    fn test_parse_missing_text_defaults_to_empty() {
        let raw = json!([{"timestamp": [[0, 100]]}]);

        let items = parse_raw_result(&raw);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "");
    }
}
