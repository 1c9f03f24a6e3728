//! Heuristic speaker segmentation.
//!
//! This is not real diarization: a speaker change is guessed whenever a
//! segment follows a silence gap of more than two seconds and carries more
//! than five words. Labels cycle through a fixed pool of three participants.

use serde::Serialize;

use crate::gateway::RawSegment;

/// Number of participant labels to cycle through.
const SPEAKER_POOL: usize = 3;
/// Silence gap (seconds) that may indicate a speaker change.
const SPEAKER_GAP_SECS: f64 = 2.0;
/// Minimum word count for a segment to trigger a speaker change.
const SPEAKER_MIN_WORDS: usize = 5;

/// A speaker-attributed transcript segment with formatted timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptSegment {
    /// Start offset formatted as HH:MM:SS.
    pub start: String,
    /// End offset formatted as HH:MM:SS.
    pub end: String,
    /// Speaker label, e.g. "Participant 2".
    pub speaker: String,
    pub text: String,
}

/// Assign speaker labels to raw timed segments.
///
/// Deterministic and stateless across calls; input order is preserved.
pub fn segment(raw: &[RawSegment]) -> Vec<TranscriptSegment> {
    let mut current_speaker = 1usize;
    let mut last_end_time = 0.0f64;
    let mut out = Vec::with_capacity(raw.len());

    for seg in raw {
        let text = seg.text.trim();
        let word_count = text.split_whitespace().count();

        if seg.start - last_end_time > SPEAKER_GAP_SECS && word_count > SPEAKER_MIN_WORDS {
            current_speaker = (current_speaker % SPEAKER_POOL) + 1;
        }

        out.push(TranscriptSegment {
            start: format_timestamp(seg.start),
            end: format_timestamp(seg.end),
            speaker: format!("Participant {}", current_speaker),
            text: text.to_string(),
        });

        last_end_time = seg.end;
    }

    out
}

/// Format a second offset as HH:MM:SS. Malformed input (non-finite or
/// negative) formats as 00:00:00 rather than failing.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00:00".to_string();
    }

    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00");
        assert_eq!(format_timestamp(61.4), "00:01:01");
        assert_eq!(format_timestamp(3661.0), "01:01:01");
    }

    #[test]
    fn test_format_timestamp_malformed() {
        assert_eq!(format_timestamp(f64::NAN), "00:00:00");
        assert_eq!(format_timestamp(f64::INFINITY), "00:00:00");
        assert_eq!(format_timestamp(-5.0), "00:00:00");
    }

    #[test]
    fn test_text_is_trimmed() {
        let raw = vec![RawSegment {
            start: 0.0,
            end: 1.0,
            text: "  hello there  ".to_string(),
        }];
        assert_eq!(segment(&raw)[0].text, "hello there");
    }
}
