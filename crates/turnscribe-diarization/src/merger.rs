//! Merge token-level timestamps into continuous speech segments

use tracing::warn;
use turnscribe_core::{Segment, Token};

/// Merge adjacent recognition tokens into continuous segments
///
/// `timestamps` holds one `[start_ms, end_ms]` pair per whitespace token
/// of `text`, in time order. Adjacent tokens whose gap is at most
/// `max_gap_ms` (inclusive) are joined into one segment, text separated
/// by a single space. A token/timestamp count mismatch is logged and
/// yields an empty result; it never fails.
pub fn merge_continuous_tokens(
    timestamps: &[(u64, u64)],
    text: &str,
    max_gap_ms: u64,
) -> Vec<Segment> {
    if timestamps.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() != timestamps.len() {
        warn!(
            "Token count ({}) does not match timestamp count ({})",
            words.len(),
            timestamps.len()
        );
        return Vec::new();
    }

    let tokens: Vec<Token> = words
        .iter()
        .zip(timestamps)
        .map(|(word, &(start_ms, end_ms))| Token {
            text: word.to_string(),
            start_ms,
            end_ms,
        })
        .collect();

    let mut segments = Vec::new();
    let mut current_start = tokens[0].start_ms;
    let mut current_end = tokens[0].end_ms;
    let mut current_text = tokens[0].text.clone();

    for token in &tokens[1..] {
        // Contiguous or overlapping tokens are merged
        if token.start_ms.saturating_sub(current_end) <= max_gap_ms {
            current_text.push(' ');
            current_text.push_str(&token.text);
            current_end = token.end_ms;
        } else {
            segments.push(build_segment(current_text, current_start, current_end));
            current_start = token.start_ms;
            current_end = token.end_ms;
            current_text = token.text.clone();
        }
    }

    segments.push(build_segment(current_text, current_start, current_end));
    segments
}

fn build_segment(text: String, start_ms: u64, end_ms: u64) -> Segment {
    Segment {
        text,
        start: start_ms as f64 / 1000.0,
        end: end_ms as f64 / 1000.0,
        embedding: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_close_tokens_and_split_on_gap() {
        let timestamps = [(0, 200), (250, 400), (800, 950)];
        let segments = merge_continuous_tokens(&timestamps, "a b c", 300);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "a b");
        assert!((segments[0].start - 0.0).abs() < 1e-9);
        assert!((segments[0].end - 0.4).abs() < 1e-9);
        assert_eq!(segments[1].text, "c");
        assert!((segments[1].start - 0.8).abs() < 1e-9);
        assert!((segments[1].end - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_gap_threshold_is_inclusive() {
        // Gap of exactly 300ms merges, 301ms splits
        let merged = merge_continuous_tokens(&[(0, 100), (400, 500)], "a b", 300);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "a b");

        let split = merge_continuous_tokens(&[(0, 100), (401, 500)], "a b", 300);
        assert_eq!(split.len(), 2);
    }

    #[test]
    fn test_overlapping_tokens_merge() {
        let segments = merge_continuous_tokens(&[(0, 500), (300, 700)], "a b", 300);
        assert_eq!(segments.len(), 1);
        assert!((segments[0].end - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_count_mismatch_yields_empty() {
        let segments = merge_continuous_tokens(&[(0, 200), (250, 400)], "a b c", 300);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_single_token() {
        let segments = merge_continuous_tokens(&[(100, 300)], "hello", 300);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "hello");
        assert!((segments[0].start - 0.1).abs() < 1e-9);
        assert!((segments[0].end - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert!(merge_continuous_tokens(&[], "a b", 300).is_empty());
        assert!(merge_continuous_tokens(&[(0, 100)], "", 300).is_empty());
    }

    #[test]
    fn test_merged_segments_carry_no_embedding() {
        let segments = merge_continuous_tokens(&[(0, 200)], "a", 300);
        assert!(segments[0].embedding.is_none());
    }
}
