//! TF-IDF vectorizer over a small in-memory corpus.
//!
//! Tokens are runs of two or more word characters. Stop words are removed
//! before n-grams are formed, so a bigram never spans a stop word's position
//! in the token stream. Weights are raw term counts times smoothed IDF
//! (`ln((1 + n) / (1 + df)) + 1`), and every row is L2-normalized.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::stop_words::is_stop_word;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Document-frequency bound, either an absolute document count or a
/// proportion of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocFrequency {
    Count(usize),
    Proportion(f64),
}

/// Sparse, L2-normalized row keyed by vocabulary index.
pub type SparseVector = BTreeMap<usize, f64>;

/// Output of [`TfidfVectorizer::fit_transform`]: a shared vocabulary plus one
/// row per input document, in input order.
#[derive(Debug, Clone, Default)]
pub struct TermMatrix {
    pub vocabulary: BTreeMap<String, usize>,
    pub rows: Vec<SparseVector>,
}

impl TermMatrix {
    pub fn is_degenerate(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// Inclusive (min, max) n-gram sizes.
    pub ngram_range: (usize, usize),
    pub min_df: DocFrequency,
    pub max_df: DocFrequency,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            ngram_range: (1, 1),
            min_df: DocFrequency::Count(1),
            max_df: DocFrequency::Proportion(1.0),
        }
    }
}

impl TfidfVectorizer {
    /// Learns a vocabulary from `documents` and returns their weighted rows.
    ///
    /// When no term survives tokenization and frequency pruning the matrix is
    /// degenerate: the vocabulary is empty and every row is empty.
    pub fn fit_transform(&self, documents: &[&str]) -> TermMatrix {
        let n_docs = documents.len();
        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| self.analyze(d)).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &analyzed {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let (min_count, max_count) = self.doc_count_bounds(n_docs);
        let mut kept: Vec<&str> = doc_freq
            .iter()
            .filter(|&(_, &df)| df >= min_count && df <= max_count)
            .map(|(term, _)| *term)
            .collect();
        kept.sort_unstable();

        let vocabulary: BTreeMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let idf: Vec<f64> = kept
            .iter()
            .map(|term| {
                let df = doc_freq[term] as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = analyzed
            .iter()
            .map(|terms| {
                let mut row = SparseVector::new();
                for term in terms {
                    if let Some(&idx) = vocabulary.get(term.as_str()) {
                        *row.entry(idx).or_insert(0.0) += 1.0;
                    }
                }
                for (idx, weight) in row.iter_mut() {
                    *weight *= idf[*idx];
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        TermMatrix { vocabulary, rows }
    }

    /// Tokenizes, drops stop words, and expands to the configured n-grams.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let tokens: Vec<&str> = TOKEN_PATTERN
            .find_iter(document)
            .map(|m| m.as_str())
            .filter(|token| !is_stop_word(token))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    fn doc_count_bounds(&self, n_docs: usize) -> (usize, usize) {
        let min_count = match self.min_df {
            DocFrequency::Count(count) => count,
            DocFrequency::Proportion(p) => (p * n_docs as f64).ceil() as usize,
        };
        let max_count = match self.max_df {
            DocFrequency::Count(count) => count,
            // Over a pair of documents any proportion below 1.0 prunes every
            // shared term and leaves the two rows with disjoint support.
            DocFrequency::Proportion(_) if n_docs <= 2 => n_docs,
            DocFrequency::Proportion(p) => (p * n_docs as f64).floor() as usize,
        };
        (min_count, max_count)
    }
}

/// Cosine similarity of two rows. Zero-length rows give 0.0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(idx, x)| large.get(idx).map(|y| x * y))
        .sum();

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

fn l2_normalize(row: &mut SparseVector) {
    let norm = row.values().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in row.values_mut() {
            *weight /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unigrams_and_bigrams() -> TfidfVectorizer {
        TfidfVectorizer {
            ngram_range: (1, 2),
            ..TfidfVectorizer::default()
        }
    }

    #[test]
    fn test_analyze_drops_stop_words_before_bigrams() {
        let terms = unigrams_and_bigrams().analyze("skilled in react and css");
        assert_eq!(
            terms,
            vec!["skilled", "react", "css", "skilled react", "react css"]
        );
    }

    #[test]
    fn test_analyze_ignores_single_character_tokens() {
        let terms = TfidfVectorizer::default().analyze("c r go rust");
        assert_eq!(terms, vec!["rust"]);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let matrix = unigrams_and_bigrams().fit_transform(&["rust tokio axum", "rust serde"]);
        for row in &matrix.rows {
            let norm: f64 = row.values().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9, "norm was {norm}");
        }
    }

    #[test]
    fn test_shared_terms_weigh_less_than_unique_terms() {
        let matrix = TfidfVectorizer::default().fit_transform(&["rust tokio", "rust serde"]);
        let rust = matrix.vocabulary["rust"];
        let tokio = matrix.vocabulary["tokio"];
        assert!(matrix.rows[0][&rust] < matrix.rows[0][&tokio]);
    }

    #[test]
    fn test_empty_corpus_is_degenerate() {
        let matrix = unigrams_and_bigrams().fit_transform(&["", "the and of"]);
        assert!(matrix.is_degenerate());
        assert_eq!(matrix.rows.len(), 2);
        assert!(matrix.rows.iter().all(|row| row.is_empty()));
    }

    #[test]
    fn test_proportional_ceiling_applies_to_larger_corpora() {
        let vectorizer = TfidfVectorizer {
            max_df: DocFrequency::Proportion(0.9),
            ..TfidfVectorizer::default()
        };
        let matrix = vectorizer.fit_transform(&["rust tokio", "rust serde", "rust axum"]);
        assert!(!matrix.vocabulary.contains_key("rust"));
        assert!(matrix.vocabulary.contains_key("tokio"));
    }

    #[test]
    fn test_proportional_ceiling_keeps_shared_terms_for_pairs() {
        let vectorizer = TfidfVectorizer {
            max_df: DocFrequency::Proportion(0.9),
            ..TfidfVectorizer::default()
        };
        let matrix = vectorizer.fit_transform(&["rust tokio", "rust serde"]);
        assert!(matrix.vocabulary.contains_key("rust"));
    }

    #[test]
    fn test_absolute_ceiling_is_always_applied() {
        let vectorizer = TfidfVectorizer {
            max_df: DocFrequency::Count(1),
            ..TfidfVectorizer::default()
        };
        let matrix = vectorizer.fit_transform(&["rust tokio", "rust serde"]);
        assert!(!matrix.vocabulary.contains_key("rust"));
    }

    #[test]
    fn test_min_df_prunes_rare_terms() {
        let vectorizer = TfidfVectorizer {
            min_df: DocFrequency::Count(2),
            ..TfidfVectorizer::default()
        };
        let matrix = vectorizer.fit_transform(&["rust tokio", "rust serde"]);
        assert_eq!(matrix.vocabulary.len(), 1);
    }

    #[test]
    fn test_cosine_of_identical_rows_is_one() {
        let matrix = unigrams_and_bigrams().fit_transform(&["rust tokio axum", "rust tokio axum"]);
        let sim = cosine_similarity(&matrix.rows[0], &matrix.rows[1]);
        assert!((sim - 1.0).abs() < 1e-9, "similarity was {sim}");
    }

    #[test]
    fn test_cosine_of_disjoint_rows_is_zero() {
        let matrix = unigrams_and_bigrams().fit_transform(&["rust tokio", "python django"]);
        assert_eq!(cosine_similarity(&matrix.rows[0], &matrix.rows[1]), 0.0);
    }

    #[test]
    fn test_cosine_with_empty_row_is_zero() {
        let row: SparseVector = [(0, 1.0)].into_iter().collect();
        assert_eq!(cosine_similarity(&row, &SparseVector::new()), 0.0);
    }
}
