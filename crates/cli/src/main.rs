//! Assistant CLI - voice and text command assistant in the terminal

mod commands;
mod output;
mod repl;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use assistant::{InteractionMode, Settings, SettingsSource, VoiceAssistant};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Voice and text command assistant
#[derive(Parser)]
#[command(name = "assistant")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Voice and text command assistant")]
#[command(long_about = r#"
Routes short commands (time, date, greetings, system info, file explorer,
web/YouTube/Spotify search) and answers anything else with an LLM.

Examples:
  assistant                          # Choose voice or text mode interactively
  assistant --mode text              # Start typing commands right away
  assistant route "play lofi on youtube"
  assistant ask "what is the capital of France"
"#)]
struct Cli {
    /// Settings file (defaults to ~/.voice-assistant/config.toml)
    #[arg(short, long, env = "ASSISTANT_CONFIG")]
    config: Option<PathBuf>,

    /// Interaction mode; prompts when omitted and both modes are enabled
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how an utterance is routed without running it
    Route {
        /// Utterance to route
        text: String,
    },

    /// Handle a single utterance and exit
    Ask {
        /// Utterance to handle
        text: String,
    },

    /// List known command names
    Commands,

    /// Show the effective configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Voice,
    Text,
}

impl From<ModeArg> for InteractionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Voice => InteractionMode::Voice,
            ModeArg::Text => InteractionMode::Text,
        }
    }
}

/// Pick the interaction mode without prompting when the flags and settings decide it
fn resolve_mode(
    requested: Option<InteractionMode>,
    voice_enabled: bool,
    text_enabled: bool,
) -> Result<Option<InteractionMode>> {
    match (requested, voice_enabled, text_enabled) {
        (Some(InteractionMode::Voice), false, _) => bail!("Voice mode is disabled in settings"),
        (Some(InteractionMode::Text), _, false) => bail!("Text mode is disabled in settings"),
        (Some(mode), _, _) => Ok(Some(mode)),
        (None, true, false) => Ok(Some(InteractionMode::Voice)),
        (None, false, true) => Ok(Some(InteractionMode::Text)),
        (None, _, _) => Ok(None),
    }
}

fn init_logging(verbose: bool, level: &str) {
    let log_level = if verbose { "debug" } else { level };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("assistant={0},assistant_cli={0},warn", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// One line saying where the settings came from
fn describe_source(source: &SettingsSource) -> String {
    if source.file_found {
        format!("Loaded settings from {}", source.path.display())
    } else {
        format!("No config at {}, using defaults", source.path.display())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (settings, source) =
        Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    init_logging(cli.verbose, &settings.logging.level);
    tracing::info!("{}", describe_source(&source));
    if source.dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }
    tracing::debug!(
        "Settings loaded (voice: {}, text: {}, wake word: '{}')",
        settings.voice_mode_enabled,
        settings.text_mode_enabled,
        settings.wake_word
    );

    match cli.command {
        Some(Commands::Route { text }) => commands::route(&text)?,
        Some(Commands::Ask { text }) => commands::ask(settings, &text).await?,
        Some(Commands::Commands) => commands::list_commands()?,
        Some(Commands::Config) => {
            commands::show_config(&settings, &source.path.display().to_string())?;
        }
        None => {
            let mut console = repl::TerminalConsole::new()?;
            console.output().print_banner();
            console
                .output()
                .print_message("assistant", "Type 'exit' or 'quit' at any time to stop.");

            let mode = match resolve_mode(
                cli.mode.map(InteractionMode::from),
                settings.voice_mode_enabled,
                settings.text_mode_enabled,
            )? {
                Some(mode) => mode,
                None => match console
                    .prompt_mode(settings.voice_mode_enabled, settings.text_mode_enabled)
                {
                    Some(mode) => mode,
                    None => return Ok(()),
                },
            };

            let assistant =
                VoiceAssistant::from_settings(settings).context("Failed to initialize assistant")?;
            assistant.run(&mut console, mode).await;
        }
    }

    Ok(())
}
