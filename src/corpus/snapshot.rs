//! Corpus snapshot persistence
//!
//! The snapshot is a single pretty-printed UTF-8 JSON array of page records.
//! Writes replace the file wholesale: the crawler produces a complete corpus
//! per run and there is no incremental merge. The write goes to a temporary
//! sibling path and is renamed into place so a concurrent reader never
//! observes a half-written file.

use crate::corpus::Corpus;
use crate::{Result, ScoutError};
use std::path::Path;

/// Saves the corpus to the snapshot path, replacing any previous snapshot
///
/// Non-ASCII characters are preserved literally; serde_json does not escape
/// them and the file is written as UTF-8.
pub fn save_snapshot(corpus: &Corpus, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(corpus)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!("Saved {} records to {}", corpus.len(), path.display());
    Ok(())
}

/// Loads the corpus from the snapshot path
///
/// Returns an error for a missing or corrupt snapshot; the ranker maps
/// either case to an empty corpus (see [`load_snapshot_or_empty`]).
pub fn load_snapshot(path: &Path) -> Result<Corpus> {
    let content = std::fs::read_to_string(path).map_err(|e| ScoutError::Snapshot {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let corpus: Corpus = serde_json::from_str(&content).map_err(|e| ScoutError::Snapshot {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(corpus)
}

/// Loads the corpus, degrading a missing or corrupt snapshot to an empty one
///
/// Query-time code must never fail because the crawl has not run yet; the
/// caller sees an empty corpus and the ranker returns an empty context.
pub fn load_snapshot_or_empty(path: &Path) -> Corpus {
    match load_snapshot(path) {
        Ok(corpus) => {
            tracing::info!("Loaded {} records from {}", corpus.len(), path.display());
            corpus
        }
        Err(e) => {
            tracing::warn!("Falling back to empty corpus: {}", e);
            Vec::new()
        }
    }
}
