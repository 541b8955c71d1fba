//! Output formatting and terminal rendering

use assistant::Console;
use colored::Colorize;

/// Output handler for terminal display
#[derive(Debug, Default, Clone, Copy)]
pub struct OutputHandler;

impl OutputHandler {
    /// Print the welcome banner
    pub fn print_banner(&self) {
        let border = "=".repeat(40);
        println!("{}", border.cyan());
        println!("{}", "Voice Assistant v1.0".cyan().bold());
        println!("{}", "Command-line assistant powered by Groq AI".cyan());
        println!("{}", border.cyan());
    }

    /// Print a section header
    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", format!("▶ {}", text).bright_yellow().bold());
        println!("{}", "─".repeat(60).dimmed());
    }

    pub fn print_message(&self, sender: &str, text: &str) {
        let prefix = match sender.to_lowercase().as_str() {
            "assistant" => "[Assistant]".green(),
            "user" => "[You]".blue(),
            _ => format!("[{}]", sender).magenta(),
        };
        println!("{} {}", prefix, text);
    }

    pub fn print_status(&self, text: &str) {
        println!("{} {}", "[Status]".yellow(), text);
    }

    pub fn print_error(&self, text: &str) {
        println!("{} {}", "[Error]".red(), text);
    }

    /// Print an indented `key: value` line
    pub fn print_field(&self, key: &str, value: &str) {
        println!("  {} {}", format!("{}:", key).dimmed(), value);
    }
}

/// Output-only console for one-shot subcommands
impl Console for OutputHandler {
    fn show_message(&self, sender: &str, text: &str) {
        self.print_message(sender, text);
    }

    fn show_status(&self, text: &str) {
        self.print_status(text);
    }

    fn show_error(&self, text: &str) {
        self.print_error(text);
    }

    fn read_command(&mut self) -> Option<String> {
        None
    }
}
