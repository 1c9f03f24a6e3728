//! Transcription and summarization gateway.
//!
//! The external speech-to-text and language-model services are opaque
//! collaborators behind this trait; the controller only sees segments and
//! strings.

pub mod openai;

pub use openai::OpenAiGateway;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::GatewayError;

/// A timed text segment as returned by the speech-to-text service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSegment {
    /// Start offset in seconds from the beginning of the recording.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
    pub text: String,
}

#[async_trait]
pub trait TranscriptionGateway: Send + Sync {
    fn name(&self) -> &'static str;

    /// Transcribe a WAV file into timed segments, ordered by start offset.
    async fn transcribe(&self, wav: &[u8]) -> Result<Vec<RawSegment>, GatewayError>;

    /// Summarize the given prompt text into a short summary.
    async fn summarize(&self, prompt: &str) -> Result<String, GatewayError>;
}
