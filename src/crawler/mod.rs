//! Crawler module for building the index from a live site
//!
//! This module contains the core crawling logic, including:
//! - The deduplicating LIFO frontier
//! - Rate-limited HTTP fetching
//! - HTML parsing into page text and links
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{Coordinator, CrawlOutcome, ShutdownHandle};
pub use fetcher::{build_http_client, FetchError, Fetcher, PageContent, RateLimiter};
pub use frontier::Frontier;
pub use parser::{parse_page, ParsedPage};
