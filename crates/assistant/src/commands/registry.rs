//! Fixed mapping from command names to handlers

use std::{collections::HashMap, sync::Arc};

use super::{
    CommandHandler, CommandName, DateHandler, GreetHandler, Launcher, OpenExplorerHandler,
    SearchEngine, SearchHandler, SystemInfoHandler, SystemLauncher, TimeHandler,
};

/// Command registry, built once at startup and read-only afterwards
pub struct CommandRegistry {
    handlers: HashMap<CommandName, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Build the registry with a handler for every [`CommandName`]
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        let handlers = CommandName::ALL
            .iter()
            .map(|&name| (name, Self::handler_for(name, &launcher)))
            .collect();

        Self { handlers }
    }

    /// Registry wired to the real browser and file manager
    pub fn with_system_launcher() -> Self {
        Self::new(Arc::new(SystemLauncher))
    }

    // Exhaustive match: adding a CommandName without a handler does not compile
    fn handler_for(name: CommandName, launcher: &Arc<dyn Launcher>) -> Arc<dyn CommandHandler> {
        match name {
            CommandName::Time => Arc::new(TimeHandler),
            CommandName::Date => Arc::new(DateHandler),
            CommandName::Greet => Arc::new(GreetHandler),
            CommandName::SystemInfo => Arc::new(SystemInfoHandler),
            CommandName::OpenExplorer => Arc::new(OpenExplorerHandler::new(launcher.clone())),
            CommandName::SearchWeb => {
                Arc::new(SearchHandler::new(SearchEngine::Google, launcher.clone()))
            }
            CommandName::SearchYoutube => {
                Arc::new(SearchHandler::new(SearchEngine::YouTube, launcher.clone()))
            }
            CommandName::SearchSpotify => {
                Arc::new(SearchHandler::new(SearchEngine::Spotify, launcher.clone()))
            }
        }
    }

    pub fn get(&self, name: CommandName) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(&name).cloned()
    }

    /// Known command names, in declaration order
    pub fn known_commands(&self) -> Vec<&'static str> {
        CommandName::ALL
            .iter()
            .filter(|name| self.handlers.contains_key(*name))
            .map(CommandName::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.known_commands())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{testing::RecordingLauncher, CommandArgs};

    #[test]
    fn test_registry_covers_every_command() {
        let registry = CommandRegistry::new(Arc::new(RecordingLauncher::default()));

        assert_eq!(registry.len(), 8);
        for name in CommandName::ALL {
            assert!(registry.get(name).is_some(), "missing handler for {}", name);
        }
    }

    #[test]
    fn test_known_commands_order() {
        let registry = CommandRegistry::new(Arc::new(RecordingLauncher::default()));
        assert_eq!(
            registry.known_commands(),
            vec![
                "time",
                "date",
                "greet",
                "system_info",
                "open_explorer",
                "search_web",
                "search_youtube",
                "search_spotify",
            ]
        );
    }

    #[test]
    fn test_handlers_share_launcher() {
        let launcher = Arc::new(RecordingLauncher::default());
        let registry = CommandRegistry::new(launcher.clone());

        let web = registry.get(CommandName::SearchWeb).unwrap();
        web.execute(&CommandArgs::positional("rust")).unwrap();
        let youtube = registry.get(CommandName::SearchYoutube).unwrap();
        youtube.execute(&CommandArgs::positional("rust")).unwrap();

        assert_eq!(
            *launcher.urls.lock().unwrap(),
            vec![
                "https://www.google.com/search?q=rust".to_string(),
                "https://www.youtube.com/results?search_query=rust".to_string(),
            ]
        );
    }
}
