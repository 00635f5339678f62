//! Corpus data model and snapshot persistence
//!
//! The corpus is the crawler's output and the ranker's input: an ordered
//! sequence of page records serialized to a single JSON snapshot file.

mod record;
mod snapshot;

pub use record::{ContentNode, Corpus, FaqEntry, PageRecord};
pub use snapshot::{load_snapshot, load_snapshot_or_empty, save_snapshot};
