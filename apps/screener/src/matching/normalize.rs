//! Text normalization applied to both sides of a match before vectorizing.

use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http\S+|www\S+").expect("URL pattern is a valid regex")
});

/// Anything that is not a word character, whitespace, or basic punctuation.
static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^\w\s.,;:!?'"\-]"#).expect("character filter is a valid regex")
});

/// Punctuation that survives normalization.
pub const ALLOWED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"', '-'];

/// Normalizes free text for matching:
/// lower-case, drop URLs, drop characters outside word characters / whitespace /
/// [`ALLOWED_PUNCTUATION`], then collapse whitespace runs to single spaces.
///
/// Never fails; empty or symbol-only input yields an empty string.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let without_urls = URL_PATTERN.replace_all(&lowered, "");
    let filtered = DISALLOWED_CHARS.replace_all(&without_urls, "");

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized text on whitespace and trims allow-listed punctuation
/// from both ends of each token. Tokens that were pure punctuation are dropped.
pub fn whole_tokens(normalized: &str) -> impl Iterator<Item = &str> + '_ {
    normalized
        .split_whitespace()
        .map(|token| token.trim_matches(ALLOWED_PUNCTUATION))
        .filter(|token| !token.is_empty())
}
