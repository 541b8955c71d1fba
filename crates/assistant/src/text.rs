//! Text normalization shared by the router, the suggester and the interaction loops.

/// Utterances that end the interaction loop when spoken or typed on their own.
pub const EXIT_TOKENS: [&str; 4] = ["exit", "quit", "stop", "q"];

/// Trim, lowercase and collapse internal whitespace runs to a single space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// True only when the whole normalized utterance is an exit token.
///
/// "please exit now" is not an exit command; it falls through to routing.
pub fn is_exit_command(text: &str) -> bool {
    let normalized = normalize(text);
    EXIT_TOKENS.contains(&normalized.as_str())
}
