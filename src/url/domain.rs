/// Checks whether a candidate URL belongs to the crawled domain
///
/// Containment is a plain substring test against the full URL string, so the
/// filter `quotes.toscrape.com` accepts `https://quotes.toscrape.com/page/2/`
/// and rejects `https://www.goodreads.com/quotes`.
///
/// # Examples
///
/// ```
/// use siteseek::url::in_domain;
///
/// assert!(in_domain("https://quotes.toscrape.com/login", "quotes.toscrape.com"));
/// assert!(!in_domain("https://www.goodreads.com/quotes", "quotes.toscrape.com"));
/// ```
pub fn in_domain(url: &str, domain: &str) -> bool {
    !domain.is_empty() && url.contains(domain)
}
