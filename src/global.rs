//! Application-wide paths.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_DIR: &str = "meetnote";

/// Configuration directory, e.g. `~/.config/meetnote`.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_DIR))
}

/// Path to the TOML config file.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Data directory, e.g. `~/.local/share/meetnote`.
pub fn data_dir() -> Result<PathBuf> {
    let base = match dirs::data_dir() {
        Some(d) => d,
        None => dirs::home_dir()
            .context("Could not determine home directory")?
            .join(".local")
            .join("share"),
    };
    Ok(base.join(APP_DIR))
}

/// Where CLI recording artifacts are written by default.
pub fn recordings_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("recordings"))
}
