//! Batch screening: extract → profile → score → rank.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::matching::scorer::{MatchScore, MatchScorer};
use crate::screening::extract::extract_text;
use crate::screening::profile::{extract_profile, CandidateProfile};

/// A file received from the client, not yet extracted.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongMatch,
    GoodFit,
    NeedsReview,
}

impl Recommendation {
    /// strong ≥ 85, good ≥ 70, otherwise needs review.
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::StrongMatch
        } else if score >= 70.0 {
            Self::GoodFit
        } else {
            Self::NeedsReview
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResult {
    /// 1-based position after ranking.
    pub rank: usize,
    pub candidate: String,
    pub match_score: MatchScore,
    pub recommendation: Recommendation,
    pub profile: CandidateProfile,
    pub raw_text: String,
}

/// A file that could not be turned into text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningFailure {
    pub candidate: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub results: Vec<CandidateResult>,
    pub failures: Vec<ScreeningFailure>,
    /// Mean final score across scored candidates; 0.0 when none were scored.
    pub average_score: f64,
}

/// Screens every upload against `reference_text`.
///
/// Each document is scored independently; a file that fails extraction is
/// recorded in `failures` and the rest of the batch continues.
pub fn screen_documents(
    uploads: &[UploadedDocument],
    reference_text: &str,
    scorer: &dyn MatchScorer,
) -> ScreeningOutcome {
    let mut results = Vec::with_capacity(uploads.len());
    let mut failures = Vec::new();

    for upload in uploads {
        let text = match extract_text(&upload.file_name, &upload.content) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {}: {e}", upload.file_name);
                failures.push(ScreeningFailure {
                    candidate: upload.file_name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let match_score = scorer.score(&text, reference_text);
        results.push(CandidateResult {
            rank: 0,
            candidate: upload.file_name.clone(),
            recommendation: Recommendation::from_score(match_score.score),
            match_score,
            profile: extract_profile(&text),
            raw_text: text,
        });
    }

    rank_results(&mut results);
    let average_score = average(&results);

    info!(
        "Screened {} document(s): {} scored, {} failed, average {:.1}",
        uploads.len(),
        results.len(),
        failures.len(),
        average_score
    );

    ScreeningOutcome {
        results,
        failures,
        average_score,
    }
}

/// Sorts by score descending and assigns 1-based ranks.
pub fn rank_results(results: &mut [CandidateResult]) {
    results.sort_by(|a, b| b.match_score.score.total_cmp(&a.match_score.score));
    for (idx, result) in results.iter_mut().enumerate() {
        result.rank = idx + 1;
    }
}

fn average(results: &[CandidateResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: f64 = results.iter().map(|r| r.match_score.score).sum();
    (total / results.len() as f64 * 100.0).round() / 100.0
}
