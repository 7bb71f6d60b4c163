//! State module for tracking crawl progress
//!
//! `PageOutcome` records how each dequeued page ended: indexed, or skipped
//! because of a status code or a transport failure.

mod page_state;

pub use page_state::PageOutcome;
