//! Configuration module for Policy-Scout
//!
//! Handles loading, parsing, and validating the TOML configuration that
//! drives the crawler, the ranker, and the chat layer.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    ChatConfig, Config, CrawlerConfig, RankerConfig, ScoringWeights, SnapshotConfig,
    UserAgentConfig,
};
pub use validation::validate;
