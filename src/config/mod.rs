use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub openai: OpenAiConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Capture sample rate in Hz.
    pub sample_rate: u32,
    /// Number of capture channels (1 = mono).
    pub channels: u16,
    /// Frames per buffered chunk.
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key. Empty means the processing pipeline is skipped.
    pub api_key: String,
    pub api_endpoint: String,
    pub whisper_model: String,
    pub chat_model: String,
    pub language: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub port: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000, // Whisper optimal
            channels: 1,
            chunk_size: 1024,
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_endpoint: "https://api.openai.com/v1".to_string(),
            whisper_model: "whisper-1".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            language: "en".to_string(),
            temperature: 0.3,
            max_tokens: 1000,
            request_timeout_seconds: 60,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { port: 3773 }
    }
}

impl OpenAiConfig {
    /// Whether enough configuration is present to reach the API.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_roundtrip() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.audio.sample_rate, 16000);
        assert_eq!(parsed.audio.channels, 1);
        assert_eq!(parsed.service.port, 3773);
        assert!(!parsed.openai.is_configured());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[openai]\napi_key = \"sk-test\"\n").unwrap();
        assert!(parsed.openai.is_configured());
        assert_eq!(parsed.openai.whisper_model, "whisper-1");
        assert_eq!(parsed.audio.chunk_size, 1024);
    }
}
