//! # Assistant - voice and text command assistant
//!
//! Turns short utterances into actions: a fixed, ordered keyword rule table routes
//! each utterance to a command handler (time, date, greeting, system info, file
//! explorer, web/YouTube/Spotify search). Anything unrecognized gets fuzzy command
//! suggestions and is forwarded to an LLM for a free-form answer.

pub mod assistant;
pub mod brain;
pub mod commands;
pub mod config;
pub mod router;
pub mod suggest;
pub mod text;
pub mod voice;

#[cfg(test)]
mod assistant_tests;

pub use assistant::{Console, InteractionMode, Reply, VoiceAssistant};
pub use brain::{LLMProviderTrait, ProviderError, QuestionAnswerer};
pub use commands::{
    CommandArgs, CommandError, CommandHandler, CommandName, CommandRegistry, Launcher,
    SystemLauncher,
};
pub use config::{ConfigError, Settings, SettingsSource};
pub use router::{CommandRouter, RouteDecision};
pub use text::{is_exit_command, normalize};
pub use voice::{SpeechToText, TextToSpeech, VoiceError};

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Voice error: {0}")]
    Voice(#[from] VoiceError),
}

pub type Result<T> = std::result::Result<T, AssistantError>;
