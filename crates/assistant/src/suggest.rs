//! Fuzzy "did you mean" suggestions over known command names.

use similar::TextDiff;

/// Candidates scoring below this similarity are never suggested.
pub const SUGGESTION_CUTOFF: f32 = 0.5;

/// How many suggestions the router offers for an unrecognized utterance.
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Character-level similarity in `0.0..=1.0`: `2 * matched / (len(a) + len(b))`.
pub fn similarity(a: &str, b: &str) -> f32 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    TextDiff::from_chars(a, b).ratio()
}

/// Return up to `n` candidates closest to `text`, best first.
///
/// Ties keep the order in which candidates were given.
pub fn suggest<I, S>(text: &str, candidates: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if n == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(f32, String)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let score = similarity(text, candidate);
            (score >= SUGGESTION_CUTOFF).then(|| (score, candidate.to_string()))
        })
        .collect();

    // sort_by is stable, so equal scores stay in candidate order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(n);
    scored.into_iter().map(|(_, candidate)| candidate).collect()
}
