//! Match Scorer: trait-based scorer comparing a candidate document with a
//! reference (job description) document.
//!
//! Default: `TfidfMatchScorer` (pure-Rust, deterministic, per-pair vector space).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup.

use serde::{Deserialize, Serialize};

use crate::matching::keywords::{keyword_bonus, keyword_set, matched_keywords};
use crate::matching::normalize::normalize_text;
use crate::matching::vectorizer::{cosine_similarity, DocFrequency, TfidfVectorizer};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Score breakdown for one (candidate, reference) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Final score, 0 – 100, two decimals.
    pub score: f64,
    /// Cosine similarity scaled to 0 – 100, unrounded.
    pub base_similarity: f64,
    pub keyword_bonus: f64,
    pub matched_keywords: Vec<String>,
    pub scorer_backend: String,
}

impl MatchScore {
    fn zero(backend: &str) -> Self {
        Self {
            score: 0.0,
            base_similarity: 0.0,
            keyword_bonus: 0.0,
            matched_keywords: vec![],
            scorer_backend: backend.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching handlers or the
/// screening pipeline. Scoring is total: degenerate input scores 0.0.
pub trait MatchScorer: Send + Sync {
    fn score(&self, candidate_text: &str, reference_text: &str) -> MatchScore;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// TfidfMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Fixed scoring policy constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub points_per_keyword: f64,
    pub max_keyword_bonus: f64,
    pub max_score: f64,
    pub max_df: DocFrequency,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            points_per_keyword: 2.0,
            max_keyword_bonus: 20.0,
            max_score: 100.0,
            max_df: DocFrequency::Proportion(0.9),
        }
    }
}

/// TF-IDF cosine similarity plus an exact-token keyword bonus.
///
/// Algorithm:
/// 1. Normalize both texts.
/// 2. Fit unigram + bigram TF-IDF over just the two documents.
/// 3. base = cosine(candidate, reference) × 100
/// 4. bonus = 2 × |reference keywords present in candidate|, capped at 20
/// 5. score = min(base + bonus, 100), rounded to 2 decimals
///
/// Each call builds its own vocabulary, so scores are only comparable between
/// candidates scored against the same reference.
#[derive(Debug, Clone, Default)]
pub struct TfidfMatchScorer {
    policy: ScoringPolicy,
}

impl TfidfMatchScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    fn vectorizer(&self) -> TfidfVectorizer {
        TfidfVectorizer {
            ngram_range: (1, 2),
            min_df: DocFrequency::Count(1),
            max_df: self.policy.max_df,
        }
    }
}

impl MatchScorer for TfidfMatchScorer {
    fn score(&self, candidate_text: &str, reference_text: &str) -> MatchScore {
        let candidate = normalize_text(candidate_text);
        let reference = normalize_text(reference_text);

        if candidate.is_empty() || reference.is_empty() {
            return MatchScore::zero(self.backend());
        }

        let matrix = self
            .vectorizer()
            .fit_transform(&[candidate.as_str(), reference.as_str()]);
        let base_similarity = if matrix.is_degenerate() {
            0.0
        } else {
            cosine_similarity(&matrix.rows[0], &matrix.rows[1]) * 100.0
        };

        let keywords = keyword_set(&reference);
        let matched = matched_keywords(&keywords, &candidate);
        let bonus = keyword_bonus(
            matched.len(),
            self.policy.points_per_keyword,
            self.policy.max_keyword_bonus,
        );

        let score = round2((base_similarity + bonus).min(self.policy.max_score)).max(0.0);

        MatchScore {
            score,
            base_similarity,
            keyword_bonus: bonus,
            matched_keywords: matched,
            scorer_backend: self.backend().to_string(),
        }
    }

    fn backend(&self) -> &'static str {
        "tfidf"
    }
}

/// Scores `candidate_text` against `reference_text` with the default policy.
pub fn compute_match(candidate_text: &str, reference_text: &str) -> f64 {
    TfidfMatchScorer::default()
        .score(candidate_text, reference_text)
        .score
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
