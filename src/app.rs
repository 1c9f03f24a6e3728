use crate::api::{ApiCommand, ApiServer};
use crate::audio::MicCapture;
use crate::config::Config;
use crate::controller::RecordingController;
use crate::gateway::{OpenAiGateway, TranscriptionGateway};
use crate::session::SessionHandle;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn run_service() -> Result<()> {
    info!("Starting meetnote service");

    let config = Config::load()?;

    let (tx, mut rx) = mpsc::channel::<ApiCommand>(10);

    let gateway = build_gateway(&config);
    let capture = MicCapture::new(&config.audio);
    let session = SessionHandle::default();
    let mut controller = RecordingController::new(
        Box::new(capture),
        gateway,
        config.audio.clone(),
        session.clone(),
    );

    let port = config.service.port;
    let api_server = ApiServer::new(tx, session, &config);
    tokio::spawn(async move {
        if let Err(e) = api_server.start().await {
            error!("API server failed: {}", e);
        }
    });

    info!("meetnote is ready!");
    info!(
        "Start a recording: curl -X POST http://127.0.0.1:{}/session/start",
        port
    );
    info!(
        "Stop and process:  curl -X POST http://127.0.0.1:{}/session/stop",
        port
    );

    while let Some(command) = rx.recv().await {
        match command {
            ApiCommand::Start => match controller.start_recording().await {
                Ok(true) => info!("Recording started"),
                Ok(false) => {
                    let state = controller.status().await;
                    warn!(
                        "Recording not started: {}",
                        state.status_message.unwrap_or_default()
                    );
                }
                Err(e) => error!("Failed to start recording: {}", e),
            },
            ApiCommand::Stop => match controller.stop_recording().await {
                Ok(true) => info!("Recording stopped and processed"),
                Ok(false) => {
                    let state = controller.status().await;
                    warn!(
                        "Stop did not complete: {}",
                        state.status_message.unwrap_or_default()
                    );
                }
                Err(e) => error!("Failed to stop recording: {}", e),
            },
            ApiCommand::Reset => match controller.reset_all().await {
                Ok(()) => info!("Session reset"),
                Err(e) => error!("Failed to reset session: {}", e),
            },
        }
    }

    Ok(())
}

pub fn build_gateway(config: &Config) -> Option<Arc<dyn TranscriptionGateway>> {
    match OpenAiGateway::new(&config.openai) {
        Ok(gateway) => Some(Arc::new(gateway)),
        Err(e) => {
            warn!("Transcription disabled: {}", e);
            None
        }
    }
}
