//! Command Router
//!
//! Maps one free-form utterance to a [`RouteDecision`]. Rules are plain substring
//! checks over the normalized text and are evaluated in a fixed order, first match
//! wins. Because the rules overlap ("what time does the youtube video start" hits
//! both the time and the youtube rule), the order of [`ROUTE_RULES`] is part of the
//! observable behaviour.

use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{
    commands::{CommandArgs, CommandHandler, CommandName, CommandRegistry},
    suggest::{suggest, DEFAULT_SUGGESTIONS},
    text::{is_exit_command, normalize},
};

/// One keyword rule of the routing table
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub command: CommandName,
    /// The rule fires when the normalized utterance contains any of these
    pub keywords: &'static [&'static str],
    /// Phrases removed, in order, to turn the utterance into a query argument.
    /// `None` means the command takes no arguments.
    pub strip: Option<&'static [&'static str]>,
}

impl RouteRule {
    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|keyword| normalized.contains(keyword))
    }

    fn arguments(&self, raw: &str) -> CommandArgs {
        match self.strip {
            Some(phrases) => CommandArgs::positional(extract_query(raw, phrases)),
            None => CommandArgs::none(),
        }
    }
}

/// Routing table in priority order
pub const ROUTE_RULES: [RouteRule; 6] = [
    RouteRule {
        command: CommandName::Time,
        keywords: &["time"],
        strip: None,
    },
    RouteRule {
        command: CommandName::Date,
        keywords: &["date", "day"],
        strip: None,
    },
    RouteRule {
        command: CommandName::Greet,
        keywords: &["hello", "hi", "hey", "greet"],
        strip: None,
    },
    RouteRule {
        command: CommandName::SearchSpotify,
        keywords: &["spotify", "song", "music"],
        strip: Some(&["play", "on spotify", "spotify"]),
    },
    RouteRule {
        command: CommandName::SearchYoutube,
        keywords: &["youtube"],
        strip: Some(&["play", "on youtube", "youtube"]),
    },
    // "look up" triggers the rule but is left in the query
    RouteRule {
        command: CommandName::SearchWeb,
        keywords: &["search", "google", "look up"],
        strip: Some(&["search", "google"]),
    },
];

/// Remove `phrases` from the lowercased raw utterance and trim.
///
/// An empty remainder falls back to the raw utterance, untouched.
pub fn extract_query(raw: &str, phrases: &[&str]) -> String {
    let stripped = phrases
        .iter()
        .fold(raw.to_lowercase(), |query, phrase| query.replace(phrase, ""));

    match stripped.trim() {
        "" => raw.to_string(),
        query => query.to_string(),
    }
}

/// Result of routing one utterance
#[derive(Clone)]
pub enum RouteDecision {
    /// The caller must leave its interaction loop
    Exit,
    /// A rule matched; invoke `handler` with `args`
    Dispatch {
        command: CommandName,
        handler: Arc<dyn CommandHandler>,
        args: CommandArgs,
    },
    /// No rule matched; `suggestions` holds up to three close command names
    Unrecognized { suggestions: Vec<String> },
}

impl RouteDecision {
    pub fn is_exit(&self) -> bool {
        matches!(self, RouteDecision::Exit)
    }

    pub fn command(&self) -> Option<CommandName> {
        match self {
            RouteDecision::Dispatch { command, .. } => Some(*command),
            _ => None,
        }
    }

    pub fn handler(&self) -> Option<&Arc<dyn CommandHandler>> {
        match self {
            RouteDecision::Dispatch { handler, .. } => Some(handler),
            _ => None,
        }
    }

    pub fn args(&self) -> Option<&CommandArgs> {
        match self {
            RouteDecision::Dispatch { args, .. } => Some(args),
            _ => None,
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            RouteDecision::Unrecognized { suggestions } => suggestions,
            _ => &[],
        }
    }
}

impl fmt::Debug for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDecision::Exit => f.write_str("Exit"),
            RouteDecision::Dispatch { command, args, .. } => f
                .debug_struct("Dispatch")
                .field("command", command)
                .field("args", &args.args)
                .field("kwargs", &args.kwargs)
                .finish(),
            RouteDecision::Unrecognized { suggestions } => f
                .debug_struct("Unrecognized")
                .field("suggestions", suggestions)
                .finish(),
        }
    }
}

/// Routes utterances to registered command handlers
#[derive(Debug, Clone)]
pub struct CommandRouter {
    registry: Arc<CommandRegistry>,
}

impl CommandRouter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn known_commands(&self) -> Vec<&'static str> {
        self.registry.known_commands()
    }

    /// Route one utterance. Total over all input strings.
    pub fn route(&self, raw: &str) -> RouteDecision {
        if is_exit_command(raw) {
            debug!("Routed exit command");
            return RouteDecision::Exit;
        }

        let normalized = normalize(raw);

        for rule in ROUTE_RULES.iter() {
            if !rule.matches(&normalized) {
                continue;
            }
            // A rule without a registered handler is skipped like a non-match
            let Some(handler) = self.registry.get(rule.command) else {
                continue;
            };

            let args = rule.arguments(raw);
            debug!("Routed '{}' to {} with {:?}", normalized, rule.command, args.args);
            return RouteDecision::Dispatch {
                command: rule.command,
                handler,
                args,
            };
        }

        let suggestions = suggest(&normalized, self.known_commands(), DEFAULT_SUGGESTIONS);
        debug!(
            "No route for '{}', {} suggestion(s)",
            normalized,
            suggestions.len()
        );
        RouteDecision::Unrecognized { suggestions }
    }
}
