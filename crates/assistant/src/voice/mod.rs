//! Speech collaborators for voice mode
//!
//! ```text
//!   microphone ──► recorder program ──► transcription API ──► text
//!                                                              │
//!                                                     CommandRouter / LLM
//!                                                              │
//!   speaker ◄──── say / espeak ◄──────────────────────── reply text
//! ```
//!
//! Both directions are traits so the interaction loop can run against fakes.

pub mod config;
pub mod stt;
pub mod tts;

pub use config::{STTConfig, STTProvider, TTSConfig, TTSProvider};
pub use stt::{RecordingTranscriber, SpeechToText};
pub use tts::{create_tts, SilentTTS, SystemTTS, TextToSpeech};

use crate::text::normalize;

/// Voice processing errors
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("TTS error: {0}")]
    TTSError(String),

    #[error("STT error: {0}")]
    STTError(String),

    #[error("Audio capture error: {0}")]
    AudioError(String),

    #[error("No speech detected")]
    NoSpeech,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type VoiceResult<T> = Result<T, VoiceError>;

/// Whether `heard` is the configured wake word, ignoring case and spacing
pub fn is_wake_word(heard: &str, wake_word: &str) -> bool {
    normalize(heard) == normalize(wake_word)
}
