//! Shared session state for a single recording cycle.
//!
//! All mutation goes through [`SessionHandle`]; there is no ambient or
//! implicit storage. The handle is cheap to clone and safe to share between
//! the controller, the API routes, and the CLI.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Lifecycle phase of the recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Recording,
    Stopping,
    Processing,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Recording => "recording",
            SessionPhase::Stopping => "stopping",
            SessionPhase::Processing => "processing",
        }
    }
}

/// Full session state snapshot.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub started_at: Option<DateTime<Utc>>,
    pub stop_requested: bool,
    pub status_message: Option<String>,
    pub audio_wav: Option<Vec<u8>>,
    pub transcript_text: Option<String>,
    pub summary_text: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            started_at: None,
            stop_requested: false,
            status_message: None,
            audio_wav: None,
            transcript_text: None,
            summary_text: None,
        }
    }
}

impl SessionState {
    /// Elapsed recording time in whole seconds, if a recording is running.
    pub fn duration_seconds(&self) -> Option<i64> {
        self.started_at
            .map(|started| (Utc::now() - started).num_seconds().max(0))
    }
}

/// Cloneable handle to the shared session state.
#[derive(Clone, Default)]
pub struct SessionHandle {
    state: Arc<Mutex<SessionState>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn set_phase(&self, phase: SessionPhase) {
        self.state.lock().await.phase = phase;
    }

    /// Mark the session as recording, stamping the start time.
    pub async fn start_recording(&self) {
        let mut state = self.state.lock().await;
        state.phase = SessionPhase::Recording;
        state.started_at = Some(Utc::now());
        state.stop_requested = false;
    }

    pub async fn request_stop(&self) {
        let mut state = self.state.lock().await;
        state.stop_requested = true;
        state.phase = SessionPhase::Stopping;
    }

    pub async fn set_status(&self, message: impl Into<String>) {
        self.state.lock().await.status_message = Some(message.into());
    }

    pub async fn set_audio(&self, wav: Vec<u8>) {
        self.state.lock().await.audio_wav = Some(wav);
    }

    pub async fn set_transcript(&self, text: String) {
        self.state.lock().await.transcript_text = Some(text);
    }

    pub async fn set_summary(&self, text: String) {
        self.state.lock().await.summary_text = Some(text);
    }

    /// Discard artifacts from a previous cycle before a new recording starts.
    pub async fn clear_results(&self) {
        let mut state = self.state.lock().await;
        state.audio_wav = None;
        state.transcript_text = None;
        state.summary_text = None;
        state.status_message = None;
        state.stop_requested = false;
    }

    /// Return to idle after a cycle ends, keeping whatever artifacts were
    /// produced.
    pub async fn finish_cycle(&self) {
        let mut state = self.state.lock().await;
        state.phase = SessionPhase::Idle;
        state.stop_requested = false;
        state.started_at = None;
    }

    /// Drop everything and return to the default state.
    pub async fn reset(&self) {
        *self.state.lock().await = SessionState::default();
    }
}

/// Timestamped filename for a session artifact, e.g. `recording_20260827_141503.wav`.
pub fn artifact_filename(prefix: &str, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        Local::now().format("%Y%m%d_%H%M%S"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_state_is_idle() {
        let handle = SessionHandle::new();
        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.started_at.is_none());
        assert!(!state.stop_requested);
        assert!(state.audio_wav.is_none());
    }

    #[tokio::test]
    async fn test_recording_lifecycle() {
        let handle = SessionHandle::new();

        handle.start_recording().await;
        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Recording);
        assert!(state.started_at.is_some());
        assert!(state.duration_seconds().is_some());

        handle.request_stop().await;
        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Stopping);
        assert!(state.stop_requested);

        handle.finish_cycle().await;
        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(!state.stop_requested);
        assert!(state.started_at.is_none());
    }

    #[tokio::test]
    async fn test_clear_results_keeps_phase() {
        let handle = SessionHandle::new();
        handle.set_audio(vec![1, 2, 3]).await;
        handle.set_transcript("hello".to_string()).await;
        handle.set_summary("summary".to_string()).await;
        handle.set_phase(SessionPhase::Recording).await;

        handle.clear_results().await;
        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Recording);
        assert!(state.audio_wav.is_none());
        assert!(state.transcript_text.is_none());
        assert!(state.summary_text.is_none());
    }

    #[tokio::test]
    async fn test_reset_restores_default() {
        let handle = SessionHandle::new();
        handle.start_recording().await;
        handle.set_audio(vec![0; 10]).await;

        handle.reset().await;
        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.audio_wav.is_none());
        assert!(state.started_at.is_none());
    }

    #[test]
    fn test_artifact_filename_format() {
        let name = artifact_filename("recording", "wav");
        assert!(name.starts_with("recording_"));
        assert!(name.ends_with(".wav"));
    }
}
