//! Output module for reporting crawls and query results
//!
//! This module handles:
//! - Recording crawl statistics and printing the build summary
//! - Rendering occurrence lists and ranked result pages

mod results;
pub mod stats;

pub use results::{write_occurrences, write_page_prompt, write_result_page, write_results_header};
pub use stats::{print_statistics, CrawlStatistics};
