//! Speech-to-Text: record one utterance and transcribe it remotely

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info};

use super::{config::STTConfig, VoiceError, VoiceResult};
use crate::config::Settings;

/// Speech-to-Text trait
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Whether credentials are present
    fn is_configured(&self) -> bool {
        true
    }

    /// Capture a single utterance and return its transcription
    async fn listen_once(&self) -> VoiceResult<String>;
}

/// Records with an external program, then uploads to an OpenAI-compatible
/// transcription endpoint
#[derive(Debug)]
pub struct RecordingTranscriber {
    config: STTConfig,
    language: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl RecordingTranscriber {
    pub fn new(config: &STTConfig, language: &str, api_key: Option<String>) -> VoiceResult<Self> {
        info!("Initializing speech recognition with model: {}", config.model);

        let api_key = api_key.filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            debug!("Speech recognition created without API key");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            config: config.clone(),
            language: language.to_string(),
            api_key,
            client,
        })
    }

    /// Transcriber for the configured provider, carrying that provider's key
    pub fn from_settings(settings: &Settings) -> VoiceResult<Self> {
        Self::new(&settings.stt, &settings.language, settings.stt_api_key())
    }

    /// Recorder argv with `{seconds}` and `{file}` substituted
    pub fn recorder_command(&self, file: &str) -> VoiceResult<(String, Vec<String>)> {
        let seconds = self.config.record_seconds.to_string();
        let mut argv = self
            .config
            .recorder
            .iter()
            .map(|arg| arg.replace("{seconds}", &seconds).replace("{file}", file));

        let program = argv
            .next()
            .ok_or_else(|| VoiceError::AudioError("No recorder program configured".to_string()))?;
        Ok((program, argv.collect()))
    }

    /// ISO-639-1 code Whisper expects ("en-US" → "en")
    pub fn whisper_language(&self) -> &str {
        self.language.split(['-', '_']).next().unwrap_or("en")
    }

    async fn record(&self) -> VoiceResult<Vec<u8>> {
        let scratch = tempfile::Builder::new()
            .prefix("utterance-")
            .suffix(".wav")
            .tempfile()?;
        let file = scratch.path().display().to_string();
        let (program, args) = self.recorder_command(&file)?;

        info!("Listening for speech input...");
        debug!("Running recorder: {} {:?}", program, args);

        let status = tokio::process::Command::new(&program)
            .args(&args)
            .stdin(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| VoiceError::AudioError(format!("Failed to start {}: {}", program, e)))?;

        if !status.success() {
            return Err(VoiceError::AudioError(format!(
                "{} exited with {}",
                program, status
            )));
        }

        let audio = tokio::fs::read(scratch.path()).await?;
        if audio.is_empty() {
            return Err(VoiceError::NoSpeech);
        }
        Ok(audio)
    }

    async fn transcribe(&self, audio: Vec<u8>) -> VoiceResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| VoiceError::STTError("Transcription API key not configured".to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio)
                    .file_name("audio.wav")
                    .mime_str("audio/wav")?,
            )
            .text("model", self.config.model.clone())
            .text("language", self.whisper_language().to_string())
            .text("response_format", "json");

        info!("Sending audio to STT model '{}'", self.config.model);

        let response = self
            .client
            .post(self.config.transcription_endpoint())
            .header("Authorization", format!("Bearer {}", api_key))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(VoiceError::STTError(format!(
                "Transcription API error: {}",
                error_text
            )));
        }

        let body: serde_json::Value = response.json().await?;
        parse_transcription(&body)
    }
}

#[async_trait]
impl SpeechToText for RecordingTranscriber {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn listen_once(&self) -> VoiceResult<String> {
        let start_time = Instant::now();

        let audio = self.record().await?;
        let text = self.transcribe(audio).await?;

        info!(
            "Speech transcription completed in {}ms: '{}'",
            start_time.elapsed().as_millis(),
            text
        );
        Ok(text)
    }
}

/// Pull the transcript out of a transcription response body
pub fn parse_transcription(body: &serde_json::Value) -> VoiceResult<String> {
    let text = body["text"]
        .as_str()
        .or_else(|| body["output_text"].as_str())
        .map(str::trim)
        .unwrap_or_default();

    if text.is_empty() {
        return Err(VoiceError::NoSpeech);
    }
    Ok(text.to_string())
}
