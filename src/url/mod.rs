//! URL handling module for siteseek
//!
//! This module resolves discovered links against the page they were found on
//! and decides whether a URL belongs to the crawled domain.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::in_domain;
pub use normalize::{parse_seed, resolve_link};
