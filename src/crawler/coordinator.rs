//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding and draining the frontier
//! - Coordinating fetching, parsing, and link extraction
//! - Feeding page tokens into the index
//! - Handling interrupts between pages

use crate::config::Config;
use crate::crawler::fetcher::{FetchError, Fetcher, PageContent};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_page;
use crate::index::{InvertedIndex, Tokenizer};
use crate::output::CrawlStatistics;
use crate::state::PageOutcome;
use crate::url::{in_domain, parse_seed};
use crate::SeekError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Requests a running crawl to stop before its next page
///
/// Cloning the handle shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the crawl to stop; takes effect between frontier iterations
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Result of a crawl run
///
/// The index is returned as built; persisting it is up to the caller.
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Everything indexed during the run
    pub index: InvertedIndex,

    /// Page counts and timings
    pub statistics: CrawlStatistics,

    /// True when the run stopped on a shutdown request with URLs still queued
    pub interrupted: bool,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    domain: String,
    frontier: Frontier,
    fetcher: Fetcher,
    tokenizer: Tokenizer,
    index: InvertedIndex,
    statistics: CrawlStatistics,
    shutdown: ShutdownHandle,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Frontier seeded with the base URL, empty index
    /// * `Err(SeekError)` - Invalid base URL or HTTP client failure
    pub fn new(config: &Config) -> Result<Self, SeekError> {
        let fetcher = Fetcher::from_config(&config.crawler, &config.user_agent)?;
        let tokenizer = Tokenizer::from_config(config.index.stop_words.as_deref());
        Self::with_parts(config, fetcher, tokenizer)
    }

    /// Creates a coordinator from an already configured fetcher and tokenizer
    pub fn with_parts(
        config: &Config,
        fetcher: Fetcher,
        tokenizer: Tokenizer,
    ) -> Result<Self, SeekError> {
        let seed = parse_seed(&config.crawler.base_url)?;
        tracing::info!("Seeding frontier with {}", seed);

        Ok(Self {
            domain: config.crawler.domain.clone(),
            frontier: Frontier::new(seed.as_str()),
            fetcher,
            tokenizer,
            index: InvertedIndex::new(),
            statistics: CrawlStatistics::new(),
            shutdown: ShutdownHandle::new(),
        })
    }

    /// Handle that stops this crawl when triggered
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Runs the main crawl loop
    ///
    /// This is the core crawling logic that:
    /// 1. Pops the next URL from the frontier
    /// 2. Fetches the page, skipping it on any fetch failure
    /// 3. Parses HTML and queues in-domain links
    /// 4. Tokenizes the page text and appends it to the index
    ///
    /// The loop ends when the frontier is empty or the shutdown handle fires.
    pub async fn run(mut self) -> CrawlOutcome {
        tracing::info!("Starting site-wide scrape");
        let mut interrupted = false;

        loop {
            if self.shutdown.is_triggered() && !self.frontier.is_empty() {
                tracing::warn!(
                    "Crawl interrupted with {} URLs still queued",
                    self.frontier.len()
                );
                interrupted = true;
                break;
            }

            let url = match self.frontier.dequeue() {
                Some(url) => url,
                None => {
                    tracing::info!("Frontier is empty, crawl complete");
                    break;
                }
            };

            tracing::info!("Scraping {}", url);

            match self.fetcher.fetch(&url).await {
                Ok(page) => self.process_page(page),
                Err(e) => self.skip_page(e),
            }

            let processed = self.statistics.pages_processed();
            if processed % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages processed, {} in frontier, {} words indexed",
                    processed,
                    self.frontier.len(),
                    self.index.len()
                );
            }
        }

        self.statistics.finish(interrupted);
        tracing::info!(
            "Crawl finished: {} pages indexed, {} skipped in {:?}",
            self.statistics.count(PageOutcome::Indexed),
            self.statistics.pages_skipped(),
            self.statistics.elapsed()
        );

        CrawlOutcome {
            index: self.index,
            statistics: self.statistics,
            interrupted,
        }
    }

    /// Handles a fetched page
    ///
    /// This method:
    /// 1. Parses the body, resolving links against the final URL
    /// 2. Queues in-domain links not seen before
    /// 3. Indexes the page's tokens under the requested URL
    fn process_page(&mut self, page: PageContent) {
        let parsed = parse_page(&page.body, &page.final_url);

        self.handle_discovered_links(&parsed.links);

        let tokens = self.tokenizer.tokenize(&parsed.text);
        tracing::debug!(
            "Indexing {} tokens from {} ({})",
            tokens.len(),
            page.url,
            parsed.title.as_deref().unwrap_or("untitled")
        );
        self.index.index_page(&page.url, &tokens);
        self.statistics.record_indexed(tokens.len());
    }

    /// Queues every in-domain link that has not been seen yet
    fn handle_discovered_links(&mut self, links: &[String]) {
        for link in links {
            self.statistics.record_link_found();

            if !in_domain(link, &self.domain) {
                tracing::trace!("Ignoring out-of-domain link {}", link);
                continue;
            }

            if self.frontier.enqueue(link.as_str()) {
                tracing::debug!("Queued {}", link);
                self.statistics.record_link_queued();
            }
        }
    }

    fn skip_page(&mut self, error: FetchError) {
        match &error {
            FetchError::NonSuccessStatus { url, code } => {
                tracing::warn!("Got {} code from {}", code, url);
            }
            FetchError::Transport { url, source } => {
                tracing::error!("Got {} attempting to retrieve {}", source, url);
            }
        }
        self.statistics.record_skipped(error.outcome());
    }
}
