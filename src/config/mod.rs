//! Configuration module for siteseek
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a configuration file crawls
//! `https://quotes.toscrape.com/` with a six second rate limit.
//!
//! # Example
//!
//! ```no_run
//! use siteseek::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("siteseek.toml")).unwrap();
//! println!("Results per page: {}", config.query.page_length);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, IndexConfig, QueryConfig, UserAgentConfig, DEFAULT_BASE_URL,
    DEFAULT_DOMAIN, DEFAULT_INDEX_PATH, DEFAULT_PAGE_LENGTH, DEFAULT_RATE_LIMIT_SECONDS,
    DEFAULT_REQUEST_TIMEOUT_SECONDS,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};

pub use validation::{validate, MAX_RATE_LIMIT_SECONDS};
