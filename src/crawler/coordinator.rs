//! Crawl coordination - the breadth-first traversal loop
//!
//! The coordinator owns the frontier (a FIFO queue of pending URLs) and the
//! visited set, and turns a seed URL into a corpus:
//!
//! 1. Pop the frontier head; skip it if already visited
//! 2. Fetch the page (single attempt, no retry)
//! 3. On success: extract a record, enqueue unvisited same-origin links
//! 4. On failure: log and move on - one bad page never aborts the crawl
//! 5. Observe the politeness delay, then repeat
//!
//! The crawl stops when the frontier is empty or the configured page cap is
//! reached. Only the seed URL itself being unreachable is fatal.

use crate::config::Config;
use crate::corpus::{save_snapshot, Corpus};
use crate::crawler::extract::{discover_links, extract_record};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::{Result, ScoutError};
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Breadth-first site crawler
pub struct Crawler {
    config: Config,
    client: Client,
    seed: Url,
}

impl Crawler {
    /// Creates a crawler from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        let seed = Url::parse(&config.crawler.seed_url)?;
        let client = build_http_client(&config.user_agent)?;

        Ok(Self {
            config,
            client,
            seed,
        })
    }

    /// Runs the full crawl and returns the collected corpus
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::SeedUnreachable`] if the seed page itself cannot
    /// be fetched. Any later per-page failure is logged and skipped.
    pub async fn crawl(&self) -> Result<Corpus> {
        let max_pages = self.config.crawler.max_pages;
        let delay = Duration::from_millis(self.config.crawler.fetch_delay_ms);

        let mut frontier: VecDeque<Url> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut corpus: Corpus = Vec::new();

        frontier.push_back(self.seed.clone());

        tracing::info!(
            "Starting crawl of {} (max pages: {})",
            self.seed,
            max_pages.map_or("unbounded".to_string(), |n| n.to_string())
        );

        while let Some(url) = frontier.pop_front() {
            if let Some(max) = max_pages {
                if corpus.len() >= max {
                    tracing::info!("Reached page cap of {}, stopping", max);
                    break;
                }
            }

            if !visited.insert(url.to_string()) {
                continue;
            }

            tracing::debug!("Fetching {}", url);
            match fetch_url(&self.client, url.as_str()).await {
                FetchResult::Success { final_url, body } => {
                    let record = extract_record(&body, url.as_str());
                    corpus.push(record);

                    // Resolve hrefs against the post-redirect URL, but keep
                    // origin filtering anchored to the configured seed
                    let base = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
                    for link in discover_links(&body, &base, &self.seed) {
                        if !visited.contains(link.as_str()) {
                            frontier.push_back(link);
                        }
                    }

                    if corpus.len() % 10 == 0 {
                        tracing::info!(
                            "Progress: {} pages collected, {} in frontier",
                            corpus.len(),
                            frontier.len()
                        );
                    }
                }
                failure => {
                    let reason = failure.failure_reason();
                    if corpus.is_empty() && url == self.seed {
                        return Err(ScoutError::SeedUnreachable {
                            url: url.to_string(),
                            reason,
                        });
                    }
                    tracing::warn!("Skipping {}: {}", url, reason);
                }
            }

            // Politeness delay, unconditional: applies after failures too
            tokio::time::sleep(delay).await;
        }

        tracing::info!("Crawl complete: {} pages collected", corpus.len());
        Ok(corpus)
    }

    /// Runs the crawl and persists the corpus to the snapshot path
    pub async fn run(&self) -> Result<()> {
        let corpus = self.crawl().await?;
        save_snapshot(&corpus, Path::new(&self.config.snapshot.path))?;
        Ok(())
    }
}

/// Runs a complete crawl-and-save operation
///
/// This is the main entry point for the offline ingestion phase: it crawls
/// from the configured seed and replaces the corpus snapshot on disk.
pub async fn crawl(config: Config) -> Result<()> {
    let crawler = Crawler::new(config)?;
    crawler.run().await
}
