//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - Gating requests behind the global rate limit
//! - GET requests to fetch page content
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::state::PageOutcome;
use crate::ConfigError;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use url::Url;

/// Maximum number of redirects followed for one request
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// The URL that was requested
    pub url: String,

    /// URL after following redirects
    pub final_url: Url,

    /// Response body
    pub body: String,
}

/// Why a page could not be fetched
///
/// Neither variant stops the crawl; the page is skipped and never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, DNS, timeout or body read failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something other than 200
    #[error("got {code} code from {url}")]
    NonSuccessStatus { url: String, code: u16 },
}

impl FetchError {
    /// The URL that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::NonSuccessStatus { url, .. } => url,
        }
    }

    /// The crawl outcome recorded for the failed page
    pub fn outcome(&self) -> PageOutcome {
        match self {
            Self::Transport { .. } => PageOutcome::Unreachable,
            Self::NonSuccessStatus { .. } => PageOutcome::DeadLink,
        }
    }
}

/// Minimum-gap gate between consecutive requests
///
/// The gap is measured from the completion of one request to the start of the
/// next. It is not a fixed-rate scheduler: a slow response pushes the next
/// request back by the full interval.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
    last_completed: Option<Instant>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_completed: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        let last = self.last_completed?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.interval {
            Some(self.interval - elapsed)
        } else {
            None
        }
    }

    /// Suspends the caller until the interval since the last completion has passed
    pub async fn wait_ready(&self) {
        if let Some(wait) = self.time_until_ready(Instant::now()) {
            tracing::trace!("Rate limit: waiting {:?} before next request", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Records that a request has just finished
    pub fn record_completion(&mut self, now: Instant) {
        self.last_completed = Some(now);
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Example
///
/// ```no_run
/// use siteseek::config::UserAgentConfig;
/// use siteseek::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        user_agent.crawler_name, user_agent.crawler_version, user_agent.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Rate-limited page fetcher
pub struct Fetcher {
    client: Client,
    limiter: RateLimiter,
}

impl Fetcher {
    pub fn new(client: Client, rate_limit: Duration) -> Self {
        Self {
            client,
            limiter: RateLimiter::new(rate_limit),
        }
    }

    /// Builds the client and rate limit from the crawl configuration
    ///
    /// A rate limit that does not fit in a `Duration` is reported as a
    /// configuration error.
    pub fn from_config(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> crate::Result<Self> {
        let rate_limit = Duration::try_from_secs_f64(crawler.rate_limit_seconds).map_err(|e| {
            ConfigError::Validation(format!(
                "rate_limit_seconds {} is not a usable delay: {}",
                crawler.rate_limit_seconds, e
            ))
        })?;
        let client = build_http_client(
            user_agent,
            Duration::from_secs(crawler.request_timeout_seconds),
        )?;
        Ok(Self::new(client, rate_limit))
    }

    /// Fetches a page once the rate limit allows it
    ///
    /// # Request Flow
    ///
    /// 1. Wait until the rate limit interval since the last request has passed
    /// 2. Send the GET request, following redirects
    /// 3. Anything but 200 → `NonSuccessStatus`
    /// 4. Read the body as text
    /// 5. Record completion (also on failure) to start the next interval
    pub async fn fetch(&mut self, url: &str) -> Result<PageContent, FetchError> {
        self.limiter.wait_ready().await;

        let result = self.send(url).await;
        self.limiter.record_completion(Instant::now());
        result
    }

    async fn send(&self, url: &str) -> Result<PageContent, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::NonSuccessStatus {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(PageContent {
            url: url.to_string(),
            final_url,
            body,
        })
    }
}
