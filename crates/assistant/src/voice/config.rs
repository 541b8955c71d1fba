//! Speech collaborator configuration

use serde::{Deserialize, Serialize};

pub const GROQ_TRANSCRIPTION_ENDPOINT: &str =
    "https://api.groq.com/openai/v1/audio/transcriptions";
pub const OPENAI_TRANSCRIPTION_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Speech-to-Text configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct STTConfig {
    pub provider: STTProvider,
    pub model: String,
    /// Overrides the provider's transcription endpoint
    pub endpoint: Option<String>,
    /// Transcription key; Groq falls back to `[groq] api_key`, OpenAI has no fallback
    pub api_key: Option<String>,
    /// Length of one recording window
    pub record_seconds: u32,
    /// Recorder program and arguments; `{seconds}` and `{file}` are substituted
    pub recorder: Vec<String>,
}

impl Default for STTConfig {
    fn default() -> Self {
        Self {
            provider: STTProvider::Groq,
            model: "whisper-large-v3".to_string(),
            endpoint: None,
            api_key: None,
            record_seconds: 5,
            recorder: default_recorder(),
        }
    }
}

impl STTConfig {
    pub fn transcription_endpoint(&self) -> &str {
        match (&self.endpoint, &self.provider) {
            (Some(endpoint), _) => endpoint,
            (None, STTProvider::Groq) => GROQ_TRANSCRIPTION_ENDPOINT,
            (None, STTProvider::OpenAI) => OPENAI_TRANSCRIPTION_ENDPOINT,
        }
    }
}

fn default_recorder() -> Vec<String> {
    if cfg!(target_os = "macos") {
        // sox
        ["rec", "-q", "-r", "16000", "-c", "1", "{file}", "trim", "0", "{seconds}"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        [
            "arecord", "-q", "-f", "S16_LE", "-r", "16000", "-c", "1", "-d", "{seconds}", "{file}",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

/// Text-to-Speech configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TTSConfig {
    pub enabled: bool,
    pub provider: TTSProvider,
    /// Words per minute
    pub rate: u32,
    /// 0.0 to 1.0
    pub volume: f32,
    pub voice: Option<String>,
}

impl Default for TTSConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: TTSProvider::Local,
            rate: 180,
            volume: 1.0,
            voice: None,
        }
    }
}

/// STT provider options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum STTProvider {
    Groq,
    OpenAI,
}

/// TTS provider options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TTSProvider {
    /// Platform speech program
    Local,
    /// Hosted synthesis; not available yet, served by the local engine
    Groq,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcription_endpoint_selection() {
        let mut config = STTConfig::default();
        assert_eq!(config.transcription_endpoint(), GROQ_TRANSCRIPTION_ENDPOINT);

        config.provider = STTProvider::OpenAI;
        assert_eq!(config.transcription_endpoint(), OPENAI_TRANSCRIPTION_ENDPOINT);

        config.endpoint = Some("http://localhost:9000/v1/audio/transcriptions".to_string());
        assert_eq!(
            config.transcription_endpoint(),
            "http://localhost:9000/v1/audio/transcriptions"
        );
    }

    #[test]
    fn test_default_recorder_has_placeholders() {
        let recorder = STTConfig::default().recorder;
        assert!(recorder.iter().any(|arg| arg == "{file}"));
        assert!(recorder.iter().any(|arg| arg == "{seconds}"));
    }
}
