//! Interactive CLI recording flow.

pub mod args;

pub use args::{Cli, CliCommand, RecordCliArgs};

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::build_gateway;
use crate::audio::MicCapture;
use crate::config::Config;
use crate::controller::RecordingController;
use crate::global;
use crate::session::{artifact_filename, SessionHandle, SessionState};

/// Print the config file location and the effective configuration.
pub fn handle_config_command() -> Result<()> {
    let path = global::config_file()?;
    let config = Config::load()?;

    println!("Config file: {}", path.display());
    println!();
    print!("{}", toml::to_string_pretty(&config).context("Failed to serialize config")?);
    if !config.openai.is_configured() {
        println!();
        println!("Note: openai.api_key is empty, transcription is disabled.");
    }
    Ok(())
}

/// Record until the user presses Enter, then process and write artifacts.
pub async fn handle_record_command(args: RecordCliArgs) -> Result<()> {
    let config = Config::load()?;

    let gateway = build_gateway(&config);
    let capture = MicCapture::new(&config.audio);
    let session = SessionHandle::default();
    let mut controller = RecordingController::new(
        Box::new(capture),
        gateway,
        config.audio.clone(),
        session.clone(),
    );

    if !controller.start_recording().await? {
        let state = controller.status().await;
        bail!(
            "Could not start recording: {}",
            state.status_message.unwrap_or_default()
        );
    }

    println!("Recording... press Enter to stop.");
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)
    })
    .await
    .context("stdin reader task failed")?
    .context("Failed to read from stdin")?;

    let stopped = controller.stop_recording().await?;
    let state = controller.status().await;
    if let Some(message) = &state.status_message {
        println!("{}", message);
    }
    if !stopped {
        bail!("Recording produced no usable audio");
    }

    let output_dir = match args.output_dir {
        Some(dir) => dir,
        None => global::recordings_dir()?,
    };
    let written = write_artifacts(&state, &output_dir)?;

    for path in &written {
        println!("Wrote {}", path.display());
    }
    info!("Record command complete, {} artifacts written", written.len());

    Ok(())
}

/// Write whichever session artifacts exist to `output_dir`, returning the
/// paths written.
pub fn write_artifacts(state: &SessionState, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).context("Failed to create output directory")?;

    let mut written: Vec<PathBuf> = Vec::new();
    if let Some(wav) = &state.audio_wav {
        let path = output_dir.join(artifact_filename("recording", "wav"));
        std::fs::write(&path, wav).context("Failed to write recording")?;
        written.push(path);
    }
    if let Some(text) = &state.transcript_text {
        let path = output_dir.join(artifact_filename("transcript", "txt"));
        std::fs::write(&path, text).context("Failed to write transcript")?;
        written.push(path);
    }
    if let Some(text) = &state.summary_text {
        let path = output_dir.join(artifact_filename("summary", "txt"));
        std::fs::write(&path, text).context("Failed to write summary")?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifacts_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let state = SessionState {
            audio_wav: Some(vec![0u8; 64]),
            transcript_text: Some("transcript body".to_string()),
            ..Default::default()
        };

        let written = write_artifacts(&state, dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].file_name().unwrap().to_string_lossy().ends_with(".wav"));
        assert!(written[1].file_name().unwrap().to_string_lossy().ends_with(".txt"));
        assert_eq!(
            std::fs::read_to_string(&written[1]).unwrap(),
            "transcript body"
        );
    }

    #[test]
    fn test_write_artifacts_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_artifacts(&SessionState::default(), dir.path()).unwrap();
        assert!(written.is_empty());
    }
}
