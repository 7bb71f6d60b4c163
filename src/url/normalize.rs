use crate::{UrlError, UrlResult};
use url::Url;

/// Parses the crawl root into an absolute URL
///
/// Only HTTP and HTTPS URLs with a host are accepted. The result is the
/// `url` crate's serialization, so `https://example.com` becomes
/// `https://example.com/`.
///
/// # Examples
///
/// ```
/// use siteseek::url::parse_seed;
///
/// let url = parse_seed("https://quotes.toscrape.com").unwrap();
/// assert_eq!(url.as_str(), "https://quotes.toscrape.com/");
/// ```
pub fn parse_seed(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs (same page anchors)
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// Query strings and fragments are kept as written; resolution is the only
/// normalization applied.
///
/// # Examples
///
/// ```
/// use siteseek::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://quotes.toscrape.com/page/2/").unwrap();
/// assert_eq!(
///     resolve_link("/tag/love/", &base).as_deref(),
///     Some("https://quotes.toscrape.com/tag/love/")
/// );
/// assert_eq!(resolve_link("mailto:someone@example.com", &base), None);
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
