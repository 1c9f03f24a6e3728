//! Transcript document and summary prompt generation.

use chrono::Local;

use super::TranscriptSegment;

/// Placeholder stored when summary generation fails. Summarization is
/// best-effort; a failed summary never discards the transcript.
pub const SUMMARY_FAILED_PLACEHOLDER: &str = "Summary generation failed.";

/// Maximum number of transcript characters included in the summary prompt.
const SUMMARY_CHAR_BUDGET: usize = 2000;

/// Render speaker-attributed segments into a plain-text transcript document.
pub fn build_transcript(segments: &[TranscriptSegment]) -> String {
    let mut doc = String::new();
    doc.push_str("Meeting Transcript\n");
    doc.push_str(&format!(
        "Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    doc.push_str("\n=== Speaker Turns ===\n");

    for seg in segments {
        doc.push_str(&format!(
            "\n[{}-{}] {}: {}",
            seg.start, seg.end, seg.speaker, seg.text
        ));
    }

    doc
}

/// Build the summarization prompt, truncating long transcripts to keep the
/// request within a reasonable token budget.
pub fn build_summary_prompt(transcript: &str) -> String {
    let excerpt: String = transcript.chars().take(SUMMARY_CHAR_BUDGET).collect();

    format!(
        "Summarize the following meeting transcript:\n\n{}\n\n\
         Summary format:\n\
         1. Meeting overview\n\
         2. Key discussion points\n\
         3. Conclusions and next steps",
        excerpt
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: &str, end: &str, speaker: &str, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start: start.to_string(),
            end: end.to_string(),
            speaker: speaker.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_transcript_contains_speaker_turns() {
        let segments = vec![
            seg("00:00:00", "00:00:05", "Participant 1", "hello everyone"),
            seg("00:00:08", "00:00:12", "Participant 2", "hi there"),
        ];
        let doc = build_transcript(&segments);
        assert!(doc.starts_with("Meeting Transcript\n"));
        assert!(doc.contains("=== Speaker Turns ==="));
        assert!(doc.contains("[00:00:00-00:00:05] Participant 1: hello everyone"));
        assert!(doc.contains("[00:00:08-00:00:12] Participant 2: hi there"));
    }

    #[test]
    fn test_summary_prompt_truncates_long_transcripts() {
        let transcript = "x".repeat(5000);
        let prompt = build_summary_prompt(&transcript);
        let body: usize = prompt.chars().filter(|&c| c == 'x').count();
        assert_eq!(body, SUMMARY_CHAR_BUDGET);
        assert!(prompt.contains("Summary format:"));
    }
}
