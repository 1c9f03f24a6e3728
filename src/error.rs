//! Error types shared across the crate.

use thiserror::Error;

/// Errors from the microphone capture layer.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("No input device available")]
    DeviceUnavailable,

    #[error("Failed to open input stream: {0}")]
    StreamOpen(String),

    #[error("Capture is already active")]
    AlreadyActive,

    #[error("No capture in progress")]
    NotActive,

    #[error("No audio was captured")]
    EmptyRecording,

    #[error("Recording too small to be usable ({bytes} bytes)")]
    TooSmall { bytes: usize },
}

/// Errors from WAV encoding.
#[derive(Debug, Error)]
#[error("WAV encoding failed: {0}")]
pub struct EncodingError(#[from] pub hound::Error);

/// Errors from the transcription/summarization gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected API response: {0}")]
    InvalidResponse(String),

    #[error("Gateway is not configured")]
    Unavailable,
}

/// Which stage of the post-recording pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Transcribe,
    Segment,
    BuildTranscript,
    Summarize,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Transcribe => "transcription",
            PipelineStage::Segment => "speaker segmentation",
            PipelineStage::BuildTranscript => "transcript generation",
            PipelineStage::Summarize => "summary generation",
        };
        f.write_str(name)
    }
}

/// A pipeline stage failure, tagged with the stage for status reporting.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub source: anyhow::Error,
}

impl PipelineError {
    pub fn new(stage: PipelineStage, source: impl Into<anyhow::Error>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}
