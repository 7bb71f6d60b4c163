use serde::Deserialize;

/// Default site crawled when no configuration file overrides it
pub const DEFAULT_BASE_URL: &str = "https://quotes.toscrape.com/";

/// Default containment filter for discovered links
pub const DEFAULT_DOMAIN: &str = "quotes.toscrape.com";

/// Default minimum gap between two requests, in seconds
pub const DEFAULT_RATE_LIMIT_SECONDS: f64 = 6.0;

/// Default per-request timeout, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Default location of the persisted index
pub const DEFAULT_INDEX_PATH: &str = "index.json";

/// Default number of result rows shown per page
pub const DEFAULT_PAGE_LENGTH: usize = 40;

/// Main configuration structure for siteseek
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Root URL the crawl starts from
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Links are only followed when their URL contains this string
    pub domain: String,

    /// Minimum time between the end of one request and the start of the next
    #[serde(rename = "rate-limit-seconds")]
    pub rate_limit_seconds: f64,

    /// Timeout applied to every request
    #[serde(rename = "request-timeout-seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            rate_limit_seconds: DEFAULT_RATE_LIMIT_SECONDS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/siteseek/siteseek".to_string(),
        }
    }
}

/// Index persistence and tokenizing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Path of the JSON index file
    pub path: String,

    /// Replacement stop-word list; the built-in English list is used when absent
    #[serde(rename = "stop-words")]
    pub stop_words: Option<Vec<String>>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_INDEX_PATH.to_string(),
            stop_words: None,
        }
    }
}

/// Query presentation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Number of result rows per presented page
    #[serde(rename = "page-length")]
    pub page_length: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
        }
    }
}
