//! Frontier of URLs waiting to be crawled
//!
//! This module handles:
//! - The last-in-first-out work stack (depth-first exploration)
//! - The seen set used to guarantee each URL is queued at most once

use std::collections::HashSet;

/// Dedup-aware URL stack
///
/// A URL is added to the seen set the first time it is enqueued and stays
/// there for the whole crawl, so a dequeued URL is never queued again, even if
/// its fetch fails.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// URLs not yet handed out, most recent last
    queue: Vec<String>,

    /// Every URL ever enqueued
    seen: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding only the crawl root
    pub fn new(seed: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.enqueue(seed);
        frontier
    }

    /// Queues a URL unless it has been seen before
    ///
    /// # Returns
    ///
    /// * `true` - The URL was new and is now queued
    /// * `false` - The URL was already queued or already fetched; nothing changed
    pub fn enqueue(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.contains(&url) {
            return false;
        }

        self.seen.insert(url.clone());
        self.queue.push(url);
        true
    }

    /// Takes the most recently queued URL
    ///
    /// `None` means the frontier is exhausted, which ends the crawl.
    pub fn dequeue(&mut self) -> Option<String> {
        self.queue.pop()
    }

    /// Number of URLs still queued
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs ever enqueued
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn has_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }
}
