//! Interactive terminal console backed by rustyline

use anyhow::Result;
use assistant::{Console, InteractionMode};
use colored::Colorize;
use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};

use crate::output::OutputHandler;

pub struct TerminalConsole {
    output: OutputHandler,
    editor: Editor<(), DefaultHistory>,
}

impl TerminalConsole {
    pub fn new() -> Result<Self> {
        Ok(Self {
            output: OutputHandler,
            editor: Editor::new()?,
        })
    }

    pub fn output(&self) -> &OutputHandler {
        &self.output
    }

    /// Ask which interaction mode to use. `None` if input ends first.
    pub fn prompt_mode(&mut self, voice_enabled: bool, text_enabled: bool) -> Option<InteractionMode> {
        self.output.print_status("Select interaction mode:");
        if voice_enabled {
            println!("  1. Voice mode (microphone + wake word)");
        }
        if text_enabled {
            println!("  2. Text mode (type commands)");
        }

        loop {
            let choice = match self.editor.readline("Enter choice [1/2]: ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(_) => return None,
            };

            match choice.parse::<InteractionMode>() {
                Ok(InteractionMode::Voice) if voice_enabled => return Some(InteractionMode::Voice),
                Ok(InteractionMode::Text) if text_enabled => return Some(InteractionMode::Text),
                _ => self.output.print_error("Invalid choice. Please enter 1 or 2."),
            }
        }
    }
}

impl Console for TerminalConsole {
    fn show_message(&self, sender: &str, text: &str) {
        self.output.print_message(sender, text);
    }

    fn show_status(&self, text: &str) {
        self.output.print_status(text);
    }

    fn show_error(&self, text: &str) {
        self.output.print_error(text);
    }

    fn read_command(&mut self) -> Option<String> {
        let prompt = format!("{} ", "You >".blue());
        loop {
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if !input.is_empty() {
                        let _ = self.editor.add_history_entry(input);
                    }
                    return Some(input.to_string());
                }
                Err(ReadlineError::Interrupted) => {
                    println!();
                    self.output
                        .print_status("Type 'exit' or 'quit' to stop, or press Ctrl-D.");
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    return None;
                }
                Err(e) => {
                    self.output.print_error(&format!("Input error: {}", e));
                    return None;
                }
            }
        }
    }
}
