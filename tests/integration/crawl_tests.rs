//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use siteseek::config::{Config, CrawlerConfig, IndexConfig, QueryConfig, UserAgentConfig};
use siteseek::crawler::{Coordinator, CrawlOutcome, ShutdownHandle};
use siteseek::index::{IndexStore, Occurrence};
use siteseek::state::PageOutcome;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Creates a test configuration crawling the mock server
fn create_test_config(server: &MockServer, rate_limit_seconds: f64) -> Config {
    config_for_origin(&server.uri(), rate_limit_seconds)
}

/// Creates a test configuration for an `http://host:port` origin
fn config_for_origin(origin: &str, rate_limit_seconds: f64) -> Config {
    let base_url = format!("{}/", origin);
    let parsed = url::Url::parse(&base_url).expect("Failed to parse base URL");
    // Extract domain from base_url (e.g., "127.0.0.1:12345" from "http://127.0.0.1:12345/")
    let domain = format!(
        "{}:{}",
        parsed.host_str().expect("Failed to extract host"),
        parsed.port_or_known_default().expect("Failed to extract port")
    );

    Config {
        crawler: CrawlerConfig {
            base_url,
            domain,
            rate_limit_seconds,
            request_timeout_seconds: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        index: IndexConfig::default(),
        query: QueryConfig::default(),
    }
}

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn crawl(config: &Config) -> CrawlOutcome {
    Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <a href="/page1">Page 1</a>
        <a href="/page2">Page 2</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/page1",
        "<html><body><p>quick brown fox</p></body></html>",
    )
    .await;
    mount_page(
        &server,
        "/page2",
        "<html><body><p>lazy dog</p></body></html>",
    )
    .await;

    let config = create_test_config(&server, 0.0);
    let outcome = crawl(&config).await;

    assert!(!outcome.interrupted);
    assert_eq!(outcome.statistics.count(PageOutcome::Indexed), 3);
    assert_eq!(outcome.statistics.pages_skipped(), 0);

    let page1 = format!("{}/page1", base_url);
    assert_eq!(
        outcome.index.occurrences("brown"),
        Some(&[Occurrence::new(page1.as_str(), 1)][..])
    );
    assert_eq!(
        outcome.index.occurrences("quick"),
        Some(&[Occurrence::new(page1.as_str(), 0)][..])
    );

    let page2 = format!("{}/page2", base_url);
    assert_eq!(
        outcome.index.occurrences("dog"),
        Some(&[Occurrence::new(page2.as_str(), 1)][..])
    );

    // Anchor text is page text too
    let home = format!("{}/", base_url);
    let page_occurrences = outcome.index.occurrences("page").expect("anchor text indexed");
    assert!(page_occurrences.iter().all(|o| o.url == home));
    assert_eq!(page_occurrences.len(), 2);
}

#[tokio::test]
async fn test_stop_words_are_not_indexed() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        "<html><body><p>The cat and the hat</p></body></html>",
    )
    .await;

    let config = create_test_config(&server, 0.0);
    let outcome = crawl(&config).await;

    assert!(!outcome.index.contains("the"));
    assert!(!outcome.index.contains("and"));
    assert_eq!(outcome.index.occurrences("hat").map(|o| o[0].position), Some(1));
}

#[tokio::test]
async fn test_dead_link_skipped_and_crawl_continues() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<html><body>
        <a href="/missing">gone</a>
        <a href="/ok">fine</a>
        </body></html>"#,
    )
    .await;
    mount_page(&server, "/ok", "<html><body>still reachable</body></html>").await;
    // /missing is not mounted, so wiremock answers 404

    let config = create_test_config(&server, 0.0);
    let outcome = crawl(&config).await;

    assert_eq!(outcome.statistics.count(PageOutcome::Indexed), 2);
    assert_eq!(outcome.statistics.count(PageOutcome::DeadLink), 1);
    assert!(outcome.index.contains("reachable"));
    assert!(outcome
        .index
        .iter()
        .flat_map(|(_, occurrences)| occurrences)
        .all(|o| !o.url.ends_with("/missing")));
}

#[tokio::test]
async fn test_server_error_counts_as_dead_link() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/broken">broken</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = create_test_config(&server, 0.0);
    let outcome = crawl(&config).await;

    assert_eq!(outcome.statistics.count(PageOutcome::Indexed), 1);
    assert_eq!(outcome.statistics.count(PageOutcome::DeadLink), 1);
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/a">a</a> <a href="/a">again</a> <a href="/">home</a>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<a href="/">back</a> <a href="a">self</a>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, 0.0);
    let outcome = crawl(&config).await;

    assert_eq!(outcome.statistics.pages_processed(), 2);
    assert_eq!(outcome.statistics.links_queued, 1);
    // expectations are verified when the server drops
}

#[tokio::test]
async fn test_out_of_domain_links_ignored() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<html><body>
        <a href="http://elsewhere.invalid/page">external</a>
        <a href="/local">local</a>
        <a href="mailto:someone@example.com">mail</a>
        </body></html>"#,
    )
    .await;
    mount_page(&server, "/local", "<p>local page</p>").await;

    let config = create_test_config(&server, 0.0);
    let outcome = crawl(&config).await;

    assert_eq!(outcome.statistics.links_found, 2);
    assert_eq!(outcome.statistics.links_queued, 1);
    assert_eq!(outcome.statistics.pages_processed(), 2);
    assert_eq!(outcome.statistics.count(PageOutcome::Unreachable), 0);
}

#[tokio::test]
async fn test_rate_limit_spaces_requests() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/one">one</a> <a href="/two">two</a>"#,
    )
    .await;
    mount_page(&server, "/one", "<p>first</p>").await;
    mount_page(&server, "/two", "<p>second</p>").await;

    let config = create_test_config(&server, 0.2);
    let started = Instant::now();
    let outcome = crawl(&config).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome.statistics.count(PageOutcome::Indexed), 3);
    assert!(
        elapsed >= Duration::from_millis(400),
        "three requests finished in {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_index() {
    // Nothing listens on the port once the listener is dropped
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut config = config_for_origin(&format!("http://127.0.0.1:{}", port), 0.0);
    config.crawler.request_timeout_seconds = 2;
    let outcome = crawl(&config).await;

    assert!(outcome.index.is_empty());
    assert_eq!(outcome.statistics.count(PageOutcome::Unreachable), 1);
}

/// Serves a page and requests shutdown while doing so
struct ShutdownAfterServing {
    body: String,
    shutdown: ShutdownHandle,
}

impl Respond for ShutdownAfterServing {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.shutdown.trigger();
        ResponseTemplate::new(200)
            .set_body_string(self.body.clone())
            .insert_header("content-type", "text/html")
    }
}

#[tokio::test]
async fn test_shutdown_before_start_fetches_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>home</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server, 0.0);
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let shutdown = coordinator.shutdown_handle();

    let handle = tokio::spawn(coordinator.run());
    // The test runtime is single-threaded, so the crawl task has not started yet
    shutdown.trigger();
    let outcome = handle.await.expect("crawl task panicked");

    assert!(outcome.interrupted);
    assert!(outcome.index.is_empty());
    assert_eq!(outcome.statistics.pages_processed(), 0);
}

#[tokio::test]
async fn test_interrupted_crawl_keeps_partial_index() {
    let server = MockServer::start().await;

    let config = create_test_config(&server, 0.0);
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ShutdownAfterServing {
            body: r#"<p>home sweet home</p> <a href="/next">next</a>"#.to_string(),
            shutdown: coordinator.shutdown_handle(),
        })
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>later</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = coordinator.run().await;

    assert!(outcome.interrupted);
    assert!(outcome.statistics.interrupted);
    assert_eq!(outcome.statistics.count(PageOutcome::Indexed), 1);

    let home = format!("{}/", server.uri());
    assert_eq!(
        outcome.index.occurrences("home"),
        Some(&[Occurrence::new(home.as_str(), 0), Occurrence::new(home.as_str(), 2)][..])
    );
    assert_eq!(outcome.index.occurrences("next").map(<[Occurrence]>::len), Some(1));
    assert!(!outcome.index.contains("later"));

    // The partial index persists like a complete one
    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path().join("partial.json"));
    store.save(&outcome.index).unwrap();
    assert_eq!(store.load().unwrap(), outcome.index);
}

#[tokio::test]
async fn test_crawled_index_survives_save_and_load() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<html><body><p>good friends</p><a href="/books">books</a></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/books",
        "<html><body><p>good books are good friends</p></body></html>",
    )
    .await;

    let config = create_test_config(&server, 0.0);
    let outcome = crawl(&config).await;

    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path().join("index.json"));
    store.save(&outcome.index).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, outcome.index);
    assert_eq!(loaded.occurrences("good").map(<[Occurrence]>::len), Some(3));
}
