// Match scoring: normalization, per-pair TF-IDF vector space, keyword bonus.
// Pure and synchronous; callers decide where to run it.

pub mod keywords;
pub mod normalize;
pub mod scorer;
pub mod stop_words;
pub mod vectorizer;
