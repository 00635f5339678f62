//! Relevance ranker: weighted keyword lookup over the crawled corpus
//!
//! Given a free-text query, the ranker scores every corpus record with the
//! per-field weights from configuration, keeps the top scorers in a stable
//! order, and renders them into a bounded context block for the prompt.

mod context;
mod scoring;

pub use scoring::{query_terms, score_record, RecordMatch, DESCRIPTION_KEYS, LEADERSHIP_TERMS};

use crate::config::RankerConfig;
use crate::corpus::{load_snapshot_or_empty, Corpus};
use std::path::Path;

/// Query-time relevance ranker over a read-only corpus
pub struct Ranker {
    corpus: Corpus,
    config: RankerConfig,
}

impl Ranker {
    /// Creates a ranker over an in-memory corpus
    pub fn new(corpus: Corpus, config: RankerConfig) -> Self {
        Self { corpus, config }
    }

    /// Creates a ranker from the snapshot file
    ///
    /// A missing or corrupt snapshot yields an empty corpus; every query
    /// then returns an empty context rather than an error.
    pub fn from_snapshot(path: &Path, config: RankerConfig) -> Self {
        Self::new(load_snapshot_or_empty(path), config)
    }

    /// Number of records in the loaded corpus
    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    /// Ranks the corpus against a query and returns the formatted context
    ///
    /// Returns an empty string when nothing matches; the caller substitutes
    /// its "no information found" placeholder before prompting.
    pub fn rank(&self, query: &str) -> String {
        let terms = query_terms(query);
        if terms.is_empty() {
            return String::new();
        }

        let mut matches: Vec<RecordMatch> = self
            .corpus
            .iter()
            .filter_map(|record| score_record(record, &terms, &self.config.weights))
            .collect();

        // Stable sort: tied scores keep corpus order, so results are
        // deterministic across runs
        matches.sort_by(|a, b| b.score.cmp(&a.score));

        matches
            .iter()
            .take(self.config.top_k)
            .map(|m| context::format_block(m, self.config.content_preview_chars))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
