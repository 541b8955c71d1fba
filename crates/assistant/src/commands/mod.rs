//! Built-in assistant commands
//!
//! Every action the router can dispatch to is named by [`CommandName`] and implemented
//! by a [`CommandHandler`]. Handlers that touch the outside world (browser, file
//! manager) go through a [`Launcher`] so they can be exercised without side effects.

mod registry;
mod system;
mod utility;
mod web;

use std::{collections::BTreeMap, fmt, path::Path, str::FromStr};

pub use registry::CommandRegistry;
pub use system::{OpenExplorerHandler, SystemInfoHandler};
pub use utility::{format_date, format_time, greeting_for_hour, DateHandler, GreetHandler, TimeHandler};
pub use web::{form_encode, SearchEngine, SearchHandler};

/// Symbolic command identifiers, fixed at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandName {
    Time,
    Date,
    Greet,
    SystemInfo,
    OpenExplorer,
    SearchWeb,
    SearchYoutube,
    SearchSpotify,
}

impl CommandName {
    pub const ALL: [CommandName; 8] = [
        CommandName::Time,
        CommandName::Date,
        CommandName::Greet,
        CommandName::SystemInfo,
        CommandName::OpenExplorer,
        CommandName::SearchWeb,
        CommandName::SearchYoutube,
        CommandName::SearchSpotify,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::Time => "time",
            CommandName::Date => "date",
            CommandName::Greet => "greet",
            CommandName::SystemInfo => "system_info",
            CommandName::OpenExplorer => "open_explorer",
            CommandName::SearchWeb => "search_web",
            CommandName::SearchYoutube => "search_youtube",
            CommandName::SearchSpotify => "search_spotify",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("Unknown command: {}", s))
    }
}

/// Arguments extracted by the router for one dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    pub args: Vec<String>,
    /// Named options; no routing rule fills these yet
    pub kwargs: BTreeMap<String, String>,
}

impl CommandArgs {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn positional(arg: impl Into<String>) -> Self {
        Self {
            args: vec![arg.into()],
            kwargs: BTreeMap::new(),
        }
    }

    pub fn first(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn named(&self, key: &str) -> Option<&str> {
        self.kwargs.get(key).map(String::as_str)
    }
}

/// Command execution errors
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Launch failed for {target}: {reason}")]
    LaunchFailed { target: String, reason: String },

    #[error("Command failed: {0}")]
    Failed(String),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// An action bound to a command name
pub trait CommandHandler: Send + Sync {
    /// Run the action and produce a human-readable response
    fn execute(&self, args: &CommandArgs) -> CommandResult<String>;
}

/// Opens things in the user's desktop environment
pub trait Launcher: Send + Sync {
    fn open_url(&self, url: &str) -> CommandResult<()>;
    fn open_path(&self, path: &Path) -> CommandResult<()>;
}

/// Launcher backed by the OS default browser and file manager
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open_url(&self, url: &str) -> CommandResult<()> {
        tracing::debug!("Opening URL {}", url);
        open::that(url).map_err(|e| CommandError::LaunchFailed {
            target: url.to_string(),
            reason: e.to_string(),
        })
    }

    fn open_path(&self, path: &Path) -> CommandResult<()> {
        tracing::debug!("Opening path {}", path.display());
        open::that(path).map_err(|e| CommandError::LaunchFailed {
            target: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
