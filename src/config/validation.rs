use crate::config::types::{Config, CrawlerConfig, IndexConfig, QueryConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Longest accepted delay between requests (one day)
pub const MAX_RATE_LIMIT_SECONDS: f64 = 86_400.0;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_index_config(&config.index)?;
    validate_query_config(&config.query)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if config.domain.is_empty() {
        return Err(ConfigError::Validation("domain cannot be empty".to_string()));
    }

    if config.domain.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "domain cannot contain whitespace, got '{}'",
            config.domain
        )));
    }

    // The seed itself has to pass the containment filter or nothing it links to will
    if !base.as_str().contains(&config.domain) {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' is outside of domain '{}'",
            config.base_url, config.domain
        )));
    }

    if !(0.0..=MAX_RATE_LIMIT_SECONDS).contains(&config.rate_limit_seconds) {
        return Err(ConfigError::Validation(format!(
            "rate_limit_seconds must be between 0 and {}, got {}",
            MAX_RATE_LIMIT_SECONDS, config.rate_limit_seconds
        )));
    }

    if config.request_timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_seconds must be >= 1, got {}",
            config.request_timeout_seconds
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

fn validate_index_config(config: &IndexConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "index path cannot be empty".to_string(),
        ));
    }

    if let Some(words) = &config.stop_words {
        if let Some(bad) = words.iter().find(|w| w.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "stop-words cannot contain blank entries, got '{}'",
                bad
            )));
        }
    }

    Ok(())
}

fn validate_query_config(config: &QueryConfig) -> Result<(), ConfigError> {
    if config.page_length < 1 {
        return Err(ConfigError::Validation(format!(
            "page_length must be >= 1, got {}",
            config.page_length
        )));
    }

    Ok(())
}
