//! REST API server for meetnote.
//!
//! Provides HTTP endpoints for:
//! - Session control (start, stop, reset, status)
//! - Artifact download (audio, transcript, summary)

pub mod error;
pub mod routes;

use crate::config::Config;
use crate::session::SessionHandle;
use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tracing::info;

pub use routes::{ApiCommand, SessionApiState};

pub struct ApiServer {
    port: u16,
    session_state: SessionApiState,
}

impl ApiServer {
    pub fn new(
        tx: tokio::sync::mpsc::Sender<ApiCommand>,
        session: SessionHandle,
        config: &Config,
    ) -> Self {
        Self {
            port: config.service.port,
            session_state: SessionApiState { tx, session },
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = Router::new()
            .route("/", get(status))
            .route("/version", get(version))
            .merge(routes::router(self.session_state))
            .layer(ServiceBuilder::new());

        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("API server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /                    - Service info");
        info!("  GET  /version             - Get version info");
        info!("  POST /session/start       - Start recording");
        info!("  POST /session/stop        - Stop recording and process");
        info!("  POST /session/reset       - Reset session");
        info!("  GET  /session/status      - Get session status");
        info!("  GET  /session/audio       - Download recording");
        info!("  GET  /session/transcript  - Download transcript");
        info!("  GET  /session/summary     - Download summary");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "meetnote",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "meetnote"
    }))
}
