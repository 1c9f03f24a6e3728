//! Transcript processing: speaker segmentation and document generation.

pub mod document;
pub mod segmenter;

pub use document::{build_summary_prompt, build_transcript, SUMMARY_FAILED_PLACEHOLDER};
pub use segmenter::{format_timestamp, segment, TranscriptSegment};
