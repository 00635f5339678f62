use serde::Deserialize;

/// Main configuration structure for Policy-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub ranker: RankerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URL; the crawl never leaves this URL's origin
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of pages to collect; absent means unbounded
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,

    /// Politeness delay between fetches (milliseconds)
    #[serde(rename = "fetch-delay-ms", default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
}

fn default_fetch_delay_ms() -> u64 {
    2000
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Snapshot persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Path to the corpus snapshot JSON file
    pub path: String,
}

/// Relevance ranker configuration
///
/// The weights are empirically chosen constants. They are configuration,
/// not law: tune with care, the defaults are what the rest of the system
/// was calibrated against.
#[derive(Debug, Clone, Deserialize)]
pub struct RankerConfig {
    /// Number of top-scoring records rendered into the context block
    #[serde(rename = "top-k", default = "default_top_k")]
    pub top_k: usize,

    /// Plain-content fallback is truncated to this many characters
    #[serde(rename = "content-preview-chars", default = "default_preview_chars")]
    pub content_preview_chars: usize,

    #[serde(default)]
    pub weights: ScoringWeights,
}

fn default_top_k() -> usize {
    5
}

fn default_preview_chars() -> usize {
    1000
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            content_preview_chars: default_preview_chars(),
            weights: ScoringWeights::default(),
        }
    }
}

/// Per-field scoring weights, applied once per matching query term
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "w3")]
    pub title: u32,
    #[serde(default = "w2")]
    pub content: u32,
    #[serde(rename = "structured-data", default = "w2")]
    pub structured_data: u32,
    #[serde(default = "w2")]
    pub faq: u32,
    #[serde(default = "w1")]
    pub metadata: u32,
    /// Extra weight when the matched metadata key is description-like
    #[serde(rename = "description-bonus", default = "w1")]
    pub description_bonus: u32,
    /// Flat bonus for leadership-style queries against author metadata
    #[serde(rename = "author-boost", default = "w2")]
    pub author_boost: u32,
    /// Categories and related topics share this weight
    #[serde(default = "w1")]
    pub taxonomy: u32,
}

fn w1() -> u32 {
    1
}

fn w2() -> u32 {
    2
}

fn w3() -> u32 {
    3
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title: 3,
            content: 2,
            structured_data: 2,
            faq: 2,
            metadata: 1,
            description_bonus: 1,
            author_boost: 2,
            taxonomy: 1,
        }
    }
}

/// Completion-service configuration for the chat layer
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(rename = "api-base", default = "default_api_base")]
    pub api_base: String,

    /// Model identifier sent with each completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Number of recent request/response exchanges kept in the prompt
    #[serde(rename = "max-history-exchanges", default = "default_max_history")]
    pub max_history_exchanges: usize,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_max_history() -> usize {
    5
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            max_history_exchanges: default_max_history(),
        }
    }
}
