//! Text-to-Speech through the platform speech program

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{
    config::{TTSConfig, TTSProvider},
    VoiceError, VoiceResult,
};

/// Text-to-Speech trait
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn speak(&self, text: &str) -> VoiceResult<()>;
}

/// Speaks with `say` on macOS and `espeak` elsewhere
#[derive(Debug)]
pub struct SystemTTS {
    config: TTSConfig,
}

impl SystemTTS {
    pub fn new(config: &TTSConfig) -> Self {
        info!("Initializing system TTS");
        if config.provider == TTSProvider::Groq {
            warn!("Groq TTS not implemented yet, falling back to local TTS.");
        }
        Self {
            config: config.clone(),
        }
    }

    /// Program and arguments that speak `text`
    pub fn speech_command(&self, text: &str) -> (String, Vec<String>) {
        self.speech_command_for(cfg!(target_os = "macos"), text)
    }

    fn speech_command_for(&self, macos: bool, text: &str) -> (String, Vec<String>) {
        let mut args = Vec::new();
        let volume = self.config.volume.clamp(0.0, 1.0);

        if macos {
            args.push("-r".to_string());
            args.push(self.config.rate.to_string());
            if let Some(voice) = &self.config.voice {
                args.push("-v".to_string());
                args.push(voice.clone());
            }
            // say has no volume flag, only the inline [[volm]] command
            if volume < 1.0 {
                args.push(format!("[[volm {:.2}]] {}", volume, text));
            } else {
                args.push(text.to_string());
            }
            ("say".to_string(), args)
        } else {
            // espeak amplitude runs 0-200, 100 is normal
            let amplitude = (volume * 100.0).round() as u32;
            args.push("-s".to_string());
            args.push(self.config.rate.to_string());
            args.push("-a".to_string());
            args.push(amplitude.to_string());
            if let Some(voice) = &self.config.voice {
                args.push("-v".to_string());
                args.push(voice.clone());
            }
            args.push("--".to_string());
            args.push(text.to_string());
            ("espeak".to_string(), args)
        }
    }
}

#[async_trait]
impl TextToSpeech for SystemTTS {
    async fn speak(&self, text: &str) -> VoiceResult<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let (program, args) = self.speech_command(text);
        debug!("Speaking {} chars with {}", text.len(), program);

        let status = tokio::process::Command::new(&program)
            .args(&args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| VoiceError::TTSError(format!("Failed to start {}: {}", program, e)))?;

        if !status.success() {
            return Err(VoiceError::TTSError(format!(
                "{} exited with {}",
                program, status
            )));
        }
        Ok(())
    }
}

/// Used when speech output is disabled
#[derive(Debug, Default)]
pub struct SilentTTS;

#[async_trait]
impl TextToSpeech for SilentTTS {
    async fn speak(&self, _text: &str) -> VoiceResult<()> {
        debug!("TTS is disabled; skipping speech output.");
        Ok(())
    }
}

pub fn create_tts(config: &TTSConfig) -> Arc<dyn TextToSpeech> {
    if config.enabled {
        Arc::new(SystemTTS::new(config))
    } else {
        info!("TTS disabled by configuration");
        Arc::new(SilentTTS)
    }
}
