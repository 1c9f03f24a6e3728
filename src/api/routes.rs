//! Session control API endpoints.
//!
//! Provides HTTP endpoints for:
//! - Starting a recording (POST /session/start)
//! - Stopping a recording (POST /session/stop)
//! - Resetting the session (POST /session/reset)
//! - Getting session status (GET /session/status)
//! - Downloading artifacts (GET /session/audio, /session/transcript, /session/summary)

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{error, info};

use super::error::{ApiError, ApiResult};
use crate::session::{artifact_filename, SessionHandle};

/// Commands sent from API handlers to the controller loop.
#[derive(Debug)]
pub enum ApiCommand {
    Start,
    Stop,
    Reset,
}

/// Shared state for session routes.
#[derive(Clone)]
pub struct SessionApiState {
    pub tx: mpsc::Sender<ApiCommand>,
    pub session: SessionHandle,
}

pub fn router(state: SessionApiState) -> Router {
    Router::new()
        .route("/session/start", post(start_session))
        .route("/session/stop", post(stop_session))
        .route("/session/reset", post(reset_session))
        .route("/session/status", get(session_status))
        .route("/session/audio", get(download_audio))
        .route("/session/transcript", get(download_transcript))
        .route("/session/summary", get(download_summary))
        .with_state(state)
}

async fn send_command(
    state: &SessionApiState,
    command: ApiCommand,
) -> Result<Json<Value>, StatusCode> {
    match state.tx.send(command).await {
        Ok(_) => {
            // Wait a bit for the controller to process
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            Ok(status_json(state).await)
        }
        Err(e) => {
            error!("Failed to send session command: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn status_json(state: &SessionApiState) -> Json<Value> {
    let session = state.session.get().await;
    Json(json!({
        "phase": session.phase.as_str(),
        "duration_seconds": session.duration_seconds(),
        "status_message": session.status_message,
        "has_audio": session.audio_wav.is_some(),
        "has_transcript": session.transcript_text.is_some(),
        "has_summary": session.summary_text.is_some(),
    }))
}

async fn start_session(
    State(state): State<SessionApiState>,
) -> Result<Json<Value>, StatusCode> {
    info!("Session start command received via API");
    send_command(&state, ApiCommand::Start).await
}

async fn stop_session(State(state): State<SessionApiState>) -> Result<Json<Value>, StatusCode> {
    info!("Session stop command received via API");
    send_command(&state, ApiCommand::Stop).await
}

async fn reset_session(State(state): State<SessionApiState>) -> Result<Json<Value>, StatusCode> {
    info!("Session reset command received via API");
    send_command(&state, ApiCommand::Reset).await
}

async fn session_status(State(state): State<SessionApiState>) -> Json<Value> {
    status_json(&state).await
}

fn attachment(bytes: Vec<u8>, filename: String, content_type: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

async fn download_audio(State(state): State<SessionApiState>) -> ApiResult<Response> {
    let session = state.session.get().await;
    let wav = session
        .audio_wav
        .ok_or_else(|| ApiError::not_found("No recording available"))?;
    Ok(attachment(
        wav,
        artifact_filename("recording", "wav"),
        "audio/wav",
    ))
}

async fn download_transcript(State(state): State<SessionApiState>) -> ApiResult<Response> {
    let session = state.session.get().await;
    let text = session
        .transcript_text
        .ok_or_else(|| ApiError::not_found("No transcript available"))?;
    Ok(attachment(
        text.into_bytes(),
        artifact_filename("transcript", "txt"),
        "text/plain; charset=utf-8",
    ))
}

async fn download_summary(State(state): State<SessionApiState>) -> ApiResult<Response> {
    let session = state.session.get().await;
    let text = session
        .summary_text
        .ok_or_else(|| ApiError::not_found("No summary available"))?;
    Ok(attachment(
        text.into_bytes(),
        artifact_filename("summary", "txt"),
        "text/plain; charset=utf-8",
    ))
}
