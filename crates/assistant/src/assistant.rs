//! Interaction loops tying the router, command handlers, question answering
//! and the speech collaborators together

use std::{fmt, sync::Arc};

use tracing::{debug, error, info, warn};

use crate::{
    brain::QuestionAnswerer,
    commands::CommandRegistry,
    config::Settings,
    router::{CommandRouter, RouteDecision},
    text::is_exit_command,
    voice::{create_tts, is_wake_word, RecordingTranscriber, SpeechToText, TextToSpeech},
    Result,
};

pub const GOODBYE: &str = "Goodbye!";
pub const HANDLER_FAILURE: &str = "Something went wrong while executing your command.";

/// Consecutive failed recordings before voice mode gives up
const MAX_LISTEN_FAILURES: usize = 5;

/// Terminal boundary used by the interaction loops
pub trait Console {
    /// `sender` is "assistant", "user" or any other label
    fn show_message(&self, sender: &str, text: &str);
    fn show_status(&self, text: &str);
    fn show_error(&self, text: &str);
    /// Next typed command, `None` once input is exhausted
    fn read_command(&mut self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Voice,
    Text,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionMode::Voice => f.write_str("voice"),
            InteractionMode::Text => f.write_str("text"),
        }
    }
}

impl std::str::FromStr for InteractionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "voice" | "1" => Ok(InteractionMode::Voice),
            "text" | "2" => Ok(InteractionMode::Text),
            other => Err(format!("unknown interaction mode `{}`", other)),
        }
    }
}

/// What the assistant says back to one utterance
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Close command names, only for unrecognized utterances
    pub suggestions: Vec<String>,
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestions: Vec::new(),
        }
    }
}

pub fn suggestion_notice(suggestions: &[String]) -> String {
    format!(
        "I didn't recognize that command. Did you mean: {}? I'll also try to answer it as a question.",
        suggestions.join(", ")
    )
}

pub struct VoiceAssistant {
    settings: Settings,
    router: CommandRouter,
    answerer: QuestionAnswerer,
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
}

impl VoiceAssistant {
    pub fn new(
        settings: Settings,
        router: CommandRouter,
        answerer: QuestionAnswerer,
        stt: Arc<dyn SpeechToText>,
        tts: Arc<dyn TextToSpeech>,
    ) -> Self {
        Self {
            settings,
            router,
            answerer,
            stt,
            tts,
        }
    }

    /// Wire the production collaborators
    pub fn from_settings(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let router = CommandRouter::new(Arc::new(CommandRegistry::with_system_launcher()));
        let answerer = QuestionAnswerer::from_settings(&settings);
        let stt = RecordingTranscriber::from_settings(&settings)?;
        let tts = create_tts(&settings.tts);

        info!(
            "Assistant ready: {} commands, LLM answers {}",
            router.known_commands().len(),
            if answerer.is_enabled() { "enabled" } else { "disabled" }
        );
        Ok(Self::new(settings, router, answerer, Arc::new(stt), tts))
    }

    /// Compute the reply for one utterance without touching the console
    pub async fn reply_to(&self, text: &str) -> Reply {
        match self.router.route(text) {
            RouteDecision::Exit => Reply::plain(GOODBYE),
            RouteDecision::Dispatch {
                command,
                handler,
                args,
            } => match handler.execute(&args) {
                Ok(response) => Reply::plain(response),
                Err(e) => {
                    error!("Command handler '{}' failed: {}", command, e);
                    Reply::plain(HANDLER_FAILURE)
                }
            },
            RouteDecision::Unrecognized { suggestions } => {
                debug!("Unrecognized command, forwarding to question answering");
                Reply {
                    text: self.answerer.answer(text).await,
                    suggestions,
                }
            }
        }
    }

    /// Handle one utterance: show the suggestion notice, then show and speak the reply
    pub async fn handle_command(&self, console: &dyn Console, text: &str) -> Reply {
        let reply = self.reply_to(text).await;

        if !reply.suggestions.is_empty() {
            console.show_message("assistant", &suggestion_notice(&reply.suggestions));
        }
        console.show_message("assistant", &reply.text);

        if let Err(e) = self.tts.speak(&reply.text).await {
            warn!("Failed to speak reply: {}", e);
        }
        reply
    }

    pub async fn run(&self, console: &mut dyn Console, mode: InteractionMode) {
        info!("Starting {} mode", mode);
        match mode {
            InteractionMode::Voice => self.run_voice_loop(console).await,
            InteractionMode::Text => self.run_text_loop(console).await,
        }
    }

    pub async fn run_text_loop(&self, console: &mut dyn Console) {
        console.show_status("Text mode: type your commands. Type 'exit' to quit.");

        while let Some(line) = console.read_command() {
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if is_exit_command(text) {
                console.show_message("assistant", GOODBYE);
                return;
            }
            self.handle_command(&*console, text).await;
        }
        debug!("Input closed, leaving text mode");
    }

    pub async fn run_voice_loop(&self, console: &mut dyn Console) {
        if !self.stt.is_configured() {
            warn!("No transcription API key configured; voice commands will not be understood");
            console.show_error(
                "Speech recognition has no API key. Set GROQ_API_KEY (or OPENAI_API_KEY for OpenAI) and try again.",
            );
            return;
        }

        let wake_word = self.settings.wake_word.clone();
        console.show_status(&format!("Voice mode: say '{}' to wake me up.", wake_word));

        let mut failures = 0;
        while failures < MAX_LISTEN_FAILURES {
            console.show_status("Listening for wake word...");
            let heard = match self.stt.listen_once().await {
                Ok(heard) => heard,
                Err(e) => {
                    debug!("Wake word listen failed: {}", e);
                    failures += 1;
                    console.show_error("I didn't catch that. Let's try again.");
                    continue;
                }
            };
            failures = 0;

            console.show_message("user", &heard);
            if is_exit_command(&heard) {
                console.show_message("assistant", GOODBYE);
                return;
            }
            if !is_wake_word(&heard, &wake_word) {
                console.show_status("That wasn't the wake word. Say it again or say 'exit' to quit.");
                continue;
            }

            console.show_status("Wake word detected. Listening for your command...");
            let command = match self.stt.listen_once().await {
                Ok(command) => command,
                Err(e) => {
                    debug!("Command listen failed: {}", e);
                    console.show_error("I couldn't hear your command.");
                    continue;
                }
            };

            console.show_message("user", &command);
            if is_exit_command(&command) {
                console.show_message("assistant", GOODBYE);
                return;
            }
            self.handle_command(&*console, &command).await;
        }

        error!("Voice input failed {} times in a row", MAX_LISTEN_FAILURES);
        console.show_error("Voice input keeps failing. Check your microphone and try text mode.");
    }
}
