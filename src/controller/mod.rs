//! Recording lifecycle orchestration.
//!
//! The controller owns the capture source and drives a full cycle:
//! capture start/stop, WAV encoding, transcription, speaker segmentation,
//! transcript generation, and summarization. Every state change goes through
//! the shared [`SessionHandle`].

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::audio::{encode_wav, CaptureSource, WAV_HEADER_LEN};
use crate::config::AudioConfig;
use crate::error::{CaptureError, PipelineError, PipelineStage};
use crate::gateway::TranscriptionGateway;
use crate::session::{SessionHandle, SessionPhase, SessionState};
use crate::transcript::{
    build_summary_prompt, build_transcript, segment, SUMMARY_FAILED_PLACEHOLDER,
};

pub struct RecordingController {
    capture: Box<dyn CaptureSource>,
    gateway: Option<Arc<dyn TranscriptionGateway>>,
    audio: AudioConfig,
    session: SessionHandle,
}

impl RecordingController {
    pub fn new(
        capture: Box<dyn CaptureSource>,
        gateway: Option<Arc<dyn TranscriptionGateway>>,
        audio: AudioConfig,
        session: SessionHandle,
    ) -> Self {
        Self {
            capture,
            gateway,
            audio,
            session,
        }
    }

    pub fn session(&self) -> SessionHandle {
        self.session.clone()
    }

    pub async fn status(&self) -> SessionState {
        self.session.get().await
    }

    /// Begin a new recording cycle. Returns `false` (with a status message)
    /// when a recording is already running or the device cannot be opened.
    pub async fn start_recording(&mut self) -> Result<bool> {
        let state = self.session.get().await;
        if state.phase == SessionPhase::Recording {
            self.session
                .set_status("Recording already in progress")
                .await;
            return Ok(false);
        }

        // Artifacts from the previous cycle are gone once a new one starts.
        self.session.clear_results().await;

        if let Err(e) = self.capture.start() {
            error!("Failed to start capture: {}", e);
            self.session
                .set_status(format!("Failed to start recording: {}", e))
                .await;
            return Ok(false);
        }

        self.session.start_recording().await;
        self.session.set_status("Recording started").await;
        info!("Recording started");
        Ok(true)
    }

    /// Stop the current recording and run the processing pipeline.
    ///
    /// Returns `false` when no recording was in progress or the captured
    /// audio was unusable. Transcription failure keeps the audio artifact;
    /// summarization failure keeps the transcript and stores a placeholder
    /// summary.
    pub async fn stop_recording(&mut self) -> Result<bool> {
        let state = self.session.get().await;
        if state.phase != SessionPhase::Recording {
            self.session.set_status("No recording in progress").await;
            return Ok(false);
        }

        self.session.request_stop().await;
        let duration = state.duration_seconds().unwrap_or(0);

        let chunks = match self.capture.stop() {
            Ok(chunks) => chunks,
            Err(e) => {
                error!("Failed to stop capture: {}", e);
                self.finish_failed(format!("Recording failed: {}", e)).await;
                return Ok(false);
            }
        };

        let wav = match encode_wav(&chunks, self.audio.sample_rate, self.audio.channels) {
            Ok(wav) => wav,
            Err(e) => {
                error!("Failed to encode recording: {}", e);
                self.finish_failed(format!("Recording failed: {}", e)).await;
                return Ok(false);
            }
        };

        if wav.len() <= WAV_HEADER_LEN {
            let e = CaptureError::TooSmall { bytes: wav.len() };
            warn!("{}", e);
            self.finish_failed(format!("Recording failed: {}", e)).await;
            return Ok(false);
        }

        info!(
            "Recording stopped: {} bytes of WAV, {} s",
            wav.len(),
            duration
        );
        self.session
            .set_status(format!(
                "Recording complete: {:.1} KB ({} s)",
                wav.len() as f64 / 1024.0,
                duration
            ))
            .await;
        self.session.set_audio(wav.clone()).await;

        match &self.gateway {
            Some(gateway) => {
                self.session.set_phase(SessionPhase::Processing).await;
                let outcome = Self::run_pipeline(gateway.clone(), &self.session, &wav).await;
                if let Err(e) = outcome {
                    error!("{}", e);
                    self.session
                        .set_status(format!("Processing failed: {}", e))
                        .await;
                }
            }
            None => {
                info!("No transcription gateway configured, keeping audio only");
                self.session
                    .set_status(format!(
                        "Recording complete: {:.1} KB ({} s). \
                         Transcription skipped: gateway not configured",
                        wav.len() as f64 / 1024.0,
                        duration
                    ))
                    .await;
            }
        }

        self.session.finish_cycle().await;
        Ok(true)
    }

    async fn run_pipeline(
        gateway: Arc<dyn TranscriptionGateway>,
        session: &SessionHandle,
        wav: &[u8],
    ) -> Result<(), PipelineError> {
        let raw = gateway
            .transcribe(wav)
            .await
            .map_err(|e| PipelineError::new(PipelineStage::Transcribe, e))?;

        let segments = segment(&raw);
        let transcript = build_transcript(&segments);
        session.set_transcript(transcript.clone()).await;
        info!("Transcript generated: {} speaker turns", segments.len());

        let prompt = build_summary_prompt(&transcript);
        let summary = match gateway.summarize(&prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                // Best effort: a failed summary does not fail the cycle.
                warn!("Summary generation failed: {}", e);
                SUMMARY_FAILED_PLACEHOLDER.to_string()
            }
        };
        session.set_summary(summary).await;

        session.set_status("Processing complete").await;
        Ok(())
    }

    /// Stop any active capture and return the session to its default state.
    pub async fn reset_all(&mut self) -> Result<()> {
        if self.capture.is_active() {
            if let Err(e) = self.capture.stop() {
                warn!("Capture stop during reset failed: {}", e);
            }
        }
        self.session.reset().await;
        info!("Session reset");
        Ok(())
    }

    async fn finish_failed(&self, message: String) {
        self.session.set_status(message).await;
        self.session.finish_cycle().await;
    }
}
