//! Browser search commands

use std::sync::Arc;

use tracing::info;

use super::{CommandArgs, CommandError, CommandHandler, CommandResult, Launcher};

/// Search destinations the assistant knows how to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEngine {
    Google,
    YouTube,
    Spotify,
}

impl SearchEngine {
    pub fn url_for(&self, query: &str) -> String {
        let encoded = form_encode(query);
        match self {
            SearchEngine::Google => format!("https://www.google.com/search?q={}", encoded),
            SearchEngine::YouTube => {
                format!("https://www.youtube.com/results?search_query={}", encoded)
            }
            SearchEngine::Spotify => format!("https://open.spotify.com/search/{}", encoded),
        }
    }

    pub fn reply_for(&self, query: &str) -> String {
        match self {
            SearchEngine::Google => format!("Searching the web for '{}'.", query),
            SearchEngine::YouTube => format!("Opening YouTube for '{}'.", query),
            SearchEngine::Spotify => format!("Searching Spotify for '{}'.", query),
        }
    }
}

/// Percent-encode with spaces as `+`, the way HTML forms submit queries
pub fn form_encode(query: &str) -> String {
    urlencoding::encode(query).replace("%20", "+")
}

/// Opens a search results page for the first positional argument
pub struct SearchHandler {
    engine: SearchEngine,
    launcher: Arc<dyn Launcher>,
}

impl SearchHandler {
    pub fn new(engine: SearchEngine, launcher: Arc<dyn Launcher>) -> Self {
        Self { engine, launcher }
    }
}

impl CommandHandler for SearchHandler {
    fn execute(&self, args: &CommandArgs) -> CommandResult<String> {
        let query = args
            .first()
            .or_else(|| args.named("query"))
            .ok_or(CommandError::MissingArgument("query"))?;

        let url = self.engine.url_for(query);
        info!("Opening {:?} search: {}", self.engine, url);
        self.launcher.open_url(&url)?;

        Ok(self.engine.reply_for(query))
    }
}
