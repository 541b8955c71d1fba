//! Assistant settings
//!
//! Loaded from `~/.voice-assistant/config.toml` (or an explicit path), with
//! `GROQ_API_KEY` and `OPENAI_API_KEY` from the environment or a `.env` file
//! taking precedence over the file's `[groq] api_key` and `[stt] api_key`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    brain::providers::GROQ_CHAT_ENDPOINT,
    voice::{STTConfig, STTProvider, TTSConfig},
};

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_wake_word")]
    pub wake_word: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_true")]
    pub voice_mode_enabled: bool,

    #[serde(default = "default_true")]
    pub text_mode_enabled: bool,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub stt: STTConfig,

    #[serde(default)]
    pub tts: TTSConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub groq: GroqConfig,
}

fn default_wake_word() -> String {
    "hey assistant".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wake_word: default_wake_word(),
            language: default_language(),
            voice_mode_enabled: true,
            text_mode_enabled: true,
            logging: LoggingConfig::default(),
            stt: STTConfig::default(),
            tts: TTSConfig::default(),
            llm: LlmConfig::default(),
            groq: GroqConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Question-answering model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_endpoint() -> String {
    GROQ_CHAT_ENDPOINT.to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    512
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Where loaded settings came from, for logging once a subscriber exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSource {
    pub path: PathBuf,
    /// False when the default file is absent and defaults were used
    pub file_found: bool,
    pub dotenv_loaded: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroqConfig {
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Settings {
    /// Default location of the settings file
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".voice-assistant")
            .join("config.toml")
    }

    /// Load `.env`, the settings file and environment overrides, then validate
    pub fn load(path: Option<&Path>) -> Result<(Self, SettingsSource), ConfigError> {
        let dotenv_loaded = dotenv::dotenv().is_ok();
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);
        let file_found = file.exists();

        let mut settings = Self::read(path)?;
        settings.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        settings.apply_openai_key_override(std::env::var(OPENAI_API_KEY_ENV).ok());
        settings.validate()?;

        let source = SettingsSource {
            path: file,
            file_found,
            dotenv_loaded,
        };
        Ok((settings, source))
    }

    /// Read the settings file alone. A missing default file yields defaults,
    /// a missing explicit file is an error.
    pub fn read(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path));
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// A non-blank key from the environment replaces the file's key
    pub fn apply_api_key_override(&mut self, env_key: Option<String>) {
        if let Some(key) = env_key.filter(|key| !key.trim().is_empty()) {
            self.groq.api_key = Some(key);
        }
    }

    /// A non-blank `OPENAI_API_KEY` replaces `[stt] api_key` when transcribing with OpenAI
    pub fn apply_openai_key_override(&mut self, env_key: Option<String>) {
        if self.stt.provider != STTProvider::OpenAI {
            return;
        }
        if let Some(key) = env_key.filter(|key| !key.trim().is_empty()) {
            self.stt.api_key = Some(key);
        }
    }

    /// Key sent with transcription uploads for the configured provider
    pub fn stt_api_key(&self) -> Option<String> {
        let own = self.stt.api_key.clone().filter(|key| !key.trim().is_empty());
        match self.stt.provider {
            STTProvider::Groq => own.or_else(|| self.groq.api_key.clone()),
            STTProvider::OpenAI => own,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wake_word.trim().is_empty() {
            return Err(invalid("wake_word", "must not be empty"));
        }
        if !self.voice_mode_enabled && !self.text_mode_enabled {
            return Err(invalid(
                "text_mode_enabled",
                "at least one interaction mode must be enabled",
            ));
        }
        if !(0.0..=1.0).contains(&self.tts.volume) {
            return Err(invalid(
                "tts.volume",
                format!("{} is outside 0.0..=1.0", self.tts.volume),
            ));
        }
        if self.tts.rate == 0 {
            return Err(invalid("tts.rate", "must be greater than zero"));
        }
        if self.stt.record_seconds == 0 {
            return Err(invalid("stt.record_seconds", "must be greater than zero"));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(invalid(
                "logging.level",
                format!("unknown level `{}`", self.logging.level),
            ));
        }
        Ok(())
    }

    /// Copy with every API key masked, for display
    pub fn masked(&self) -> Self {
        let mut shown = self.clone();
        shown.groq.api_key = self.groq.api_key.as_deref().map(mask_key);
        shown.stt.api_key = self.stt.api_key.as_deref().map(mask_key);
        shown
    }
}

fn mask_key(key: &str) -> String {
    let len = key.chars().count();
    if len > 8 {
        format!("****{}", key.chars().skip(len - 4).collect::<String>())
    } else {
        "****".to_string()
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}
