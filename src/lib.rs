//! Policy-Scout: a website-to-chatbot knowledge pipeline
//!
//! This crate crawls an insurance company's public website into a structured
//! corpus snapshot, then answers free-text questions by ranking corpus pages
//! with weighted keyword scoring and feeding the best matches to an external
//! completion service as prompt context.

pub mod chat;
pub mod config;
pub mod corpus;
pub mod crawler;
pub mod ranker;

use thiserror::Error;

/// Main error type for Policy-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed URL unreachable: {url} ({reason})")]
    SeedUnreachable { url: String, reason: String },

    #[error("Snapshot error at {path}: {message}")]
    Snapshot { path: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Completion API error: {0}")]
    Completion(String),

    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Policy-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use corpus::{ContentNode, Corpus, FaqEntry, PageRecord};
pub use ranker::Ranker;
