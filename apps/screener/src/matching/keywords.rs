//! Reference keyword extraction and the exact-token keyword bonus.

use std::collections::{BTreeSet, HashSet};

use crate::matching::normalize::whole_tokens;
use crate::matching::stop_words::is_stop_word;

/// Keywords must be strictly longer than this many characters.
pub const MIN_KEYWORD_CHARS: usize = 3;

/// Keyword set of a normalized reference document: whole tokens longer than
/// [`MIN_KEYWORD_CHARS`] characters that are not stop words.
pub fn keyword_set(normalized_reference: &str) -> BTreeSet<String> {
    whole_tokens(normalized_reference)
        .filter(|token| token.chars().count() > MIN_KEYWORD_CHARS)
        .map(str::to_lowercase)
        .filter(|token| !is_stop_word(token))
        .collect()
}

/// Keywords from `keywords` that appear as a whole token in the normalized
/// candidate text. Each keyword counts once no matter how often it appears.
pub fn matched_keywords(keywords: &BTreeSet<String>, normalized_candidate: &str) -> Vec<String> {
    let candidate_tokens: HashSet<&str> = whole_tokens(normalized_candidate).collect();
    keywords
        .iter()
        .filter(|keyword| candidate_tokens.contains(keyword.as_str()))
        .cloned()
        .collect()
}

/// `points_per_keyword` per match, capped at `cap`.
pub fn keyword_bonus(matched: usize, points_per_keyword: f64, cap: f64) -> f64 {
    (matched as f64 * points_per_keyword).min(cap)
}
