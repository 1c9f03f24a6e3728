//! OpenAI-backed gateway: Whisper for transcription, chat completions for
//! summarization.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info};

use super::{RawSegment, TranscriptionGateway};
use crate::config::OpenAiConfig;
use crate::error::GatewayError;

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    whisper_model: String,
    chat_model: String,
    language: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiGateway {
    pub fn new(config: &OpenAiConfig) -> Result<Self, GatewayError> {
        if !config.is_configured() {
            return Err(GatewayError::Unavailable);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        let endpoint = config.api_endpoint.trim_end_matches('/').to_string();
        info!("Initialized OpenAI gateway with endpoint: {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            whisper_model: config.whisper_model.clone(),
            chat_model: config.chat_model.clone(),
            language: config.language.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<String, GatewayError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Gateway request failed with status {}: {}", status, body);

            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl TranscriptionGateway for OpenAiGateway {
    fn name(&self) -> &'static str {
        "OpenAI API"
    }

    async fn transcribe(&self, wav: &[u8]) -> Result<Vec<RawSegment>, GatewayError> {
        info!("Transcribing {} bytes via {}", wav.len(), self.name());

        let part = reqwest::multipart::Part::bytes(wav.to_vec())
            .file_name("recording.wav")
            .mime_str("audio/wav")
            .map_err(GatewayError::Http)?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.whisper_model.clone())
            .text("response_format", "verbose_json")
            .text("language", self.language.clone());

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.endpoint))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let body = Self::check_status(response).await?;

        let transcription: VerboseTranscription = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let segments = if transcription.segments.is_empty() {
            // Some deployments omit segment timing; fall back to one segment.
            vec![RawSegment {
                start: 0.0,
                end: 0.0,
                text: transcription.text,
            }]
        } else {
            transcription.segments
        };

        info!("Transcription complete: {} segments", segments.len());
        Ok(segments)
    }

    async fn summarize(&self, prompt: &str) -> Result<String, GatewayError> {
        debug!("Requesting summary ({} chars of prompt)", prompt.len());

        let body = json!({
            "model": self.chat_model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let body = Self::check_status(response).await?;

        let chat: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let summary = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("no choices in response".to_string()))?;

        info!("Summary complete: {} chars", summary.len());
        Ok(summary.trim().to_string())
    }
}
