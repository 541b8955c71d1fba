//! CLI subcommand handlers

use std::sync::Arc;

use anyhow::{Context, Result};
use assistant::{CommandRegistry, CommandRouter, RouteDecision, Settings, VoiceAssistant};

use crate::output::OutputHandler;

/// Print how an utterance would be routed, without running the handler
pub fn route(text: &str) -> Result<()> {
    let output = OutputHandler;
    let router = CommandRouter::new(Arc::new(CommandRegistry::with_system_launcher()));

    output.print_header("Routing decision");
    output.print_field("Input", text);

    match router.route(text) {
        RouteDecision::Exit => output.print_field("Decision", "exit"),
        RouteDecision::Dispatch { command, args, .. } => {
            output.print_field("Decision", "dispatch");
            output.print_field("Command", command.as_str());
            output.print_field("Args", &format!("{:?}", args.args));
            if !args.kwargs.is_empty() {
                output.print_field("Kwargs", &format!("{:?}", args.kwargs));
            }
        }
        RouteDecision::Unrecognized { suggestions } => {
            output.print_field("Decision", "unrecognized");
            let suggestions = if suggestions.is_empty() {
                "(none)".to_string()
            } else {
                suggestions.join(", ")
            };
            output.print_field("Suggestions", &suggestions);
        }
    }
    Ok(())
}

/// Handle one utterance the same way the interactive loops do
pub async fn ask(settings: Settings, text: &str) -> Result<()> {
    let assistant =
        VoiceAssistant::from_settings(settings).context("Failed to initialize assistant")?;
    let output = OutputHandler;

    output.print_message("user", text);
    assistant.handle_command(&output, text).await;
    Ok(())
}

pub fn list_commands() -> Result<()> {
    let output = OutputHandler;
    let registry = CommandRegistry::with_system_launcher();

    output.print_header("Known commands");
    for name in registry.known_commands() {
        println!("  {}", name);
    }
    Ok(())
}

/// Print the effective settings with the API keys masked
pub fn show_config(settings: &Settings, path: &str) -> Result<()> {
    let output = OutputHandler;
    let shown = settings.masked();

    output.print_header("Configuration");
    output.print_field("File", path);
    println!();
    println!(
        "{}",
        toml::to_string_pretty(&shown).context("Failed to render settings")?
    );
    Ok(())
}
