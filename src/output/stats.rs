//! Statistics gathered while crawling
//!
//! This module provides the counters the coordinator updates for every page
//! and the summary printed when a `build` finishes.

use crate::state::PageOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Wall-clock start of the crawl
    pub started_at: DateTime<Utc>,

    /// Count of dequeued pages by outcome
    pub pages_by_outcome: HashMap<PageOutcome, u64>,

    /// Tokens appended to the index
    pub tokens_indexed: u64,

    /// Links found on fetched pages, before filtering
    pub links_found: u64,

    /// Links that passed the domain filter and were new to the frontier
    pub links_queued: u64,

    /// Whether the crawl stopped before the frontier was empty
    pub interrupted: bool,

    start: Instant,
    elapsed: Option<Duration>,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            pages_by_outcome: HashMap::new(),
            tokens_indexed: 0,
            links_found: 0,
            links_queued: 0,
            interrupted: false,
            start: Instant::now(),
            elapsed: None,
        }
    }

    pub fn record_indexed(&mut self, tokens: usize) {
        *self.pages_by_outcome.entry(PageOutcome::Indexed).or_insert(0) += 1;
        self.tokens_indexed += tokens as u64;
    }

    pub fn record_skipped(&mut self, outcome: PageOutcome) {
        *self.pages_by_outcome.entry(outcome).or_insert(0) += 1;
    }

    pub fn record_link_found(&mut self) {
        self.links_found += 1;
    }

    pub fn record_link_queued(&mut self) {
        self.links_queued += 1;
    }

    /// Freezes the elapsed time
    pub fn finish(&mut self, interrupted: bool) {
        self.elapsed = Some(self.start.elapsed());
        self.interrupted = interrupted;
    }

    /// Time spent crawling, up to `finish` if it was called
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.start.elapsed())
    }

    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.pages_by_outcome.get(&outcome).copied().unwrap_or(0)
    }

    /// Pages taken off the frontier, whatever their outcome
    pub fn pages_processed(&self) -> u64 {
        self.pages_by_outcome.values().sum()
    }

    pub fn pages_skipped(&self) -> u64 {
        self.pages_by_outcome
            .iter()
            .filter(|(outcome, _)| outcome.is_error())
            .map(|(_, count)| count)
            .sum()
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `words_indexed` - Distinct words in the resulting index
pub fn print_statistics(stats: &CrawlStatistics, words_indexed: usize) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started at: {}", stats.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Duration: {:.1}s", stats.elapsed().as_secs_f64());
    println!("  Pages processed: {}", stats.pages_processed());
    println!("  Links found: {}", stats.links_found);
    println!("  Links queued: {}", stats.links_queued);
    println!("  Tokens indexed: {}", stats.tokens_indexed);
    println!("  Words indexed: {}", words_indexed);
    println!();

    println!("Pages by Outcome:");
    let total = stats.pages_processed();
    for outcome in PageOutcome::all() {
        let count = stats.count(*outcome);
        if count == 0 {
            continue;
        }
        let percentage = if total > 0 {
            (count as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    if stats.interrupted {
        println!("Crawl was interrupted before the frontier was exhausted.");
    }
}
