//! Crawler module for web page fetching and extraction
//!
//! This module contains the content-ingestion pipeline:
//! - HTTP fetching with error classification
//! - Per-field best-effort HTML extraction into page records
//! - Same-origin link discovery
//! - The breadth-first crawl loop with politeness delay

mod coordinator;
mod extract;
mod fetcher;

pub use coordinator::{crawl, Crawler};
pub use extract::{discover_links, extract_record};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
