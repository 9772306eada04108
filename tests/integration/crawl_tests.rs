//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers, plus a scripted
//! in-process fetcher for scenarios that need hosts or failures a local
//! server cannot produce, and run the full crawl cycle end-to-end.

use async_trait::async_trait;
use curio_crawl::crawler::{AssetBody, AssetProbe, Crawler, FetchError, PageFetcher, RawPage, ReqwestFetcher};
use curio_crawl::output::{MemorySink, SqliteSink};
use curio_crawl::state::PageState;
use curio_crawl::CrawlConfig;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a page that classifies as documentation, linking to `links`
fn doc_page(title: &str, links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{}">link</a>"#, l))
        .collect();
    format!(
        r#"<html><head><title>{}</title>
        <meta name="documentation" content="true"></head>
        <body><article><h1>{}</h1><p>Installation and usage notes.</p>{}</article></body></html>"#,
        title, title, anchors
    )
}

/// Builds a page with no documentation signals
fn plain_page(links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{}">link</a>"#, l))
        .collect();
    format!("<html><body><p>Welcome</p>{}</body></html>", anchors)
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Creates a configuration that crawls quickly without touching the disk
fn create_test_config(start_url: &str) -> CrawlConfig {
    let mut config = CrawlConfig::new(start_url);
    config.requests_per_second = 1000.0;
    config.delay_between_requests = 0.0;
    config.retry_delay = 0.01;
    config.timeout = 5.0;
    config.download_assets = false;
    config.user_agent = "TestBot/1.0".to_string();
    config
}

fn http_fetcher() -> Arc<ReqwestFetcher> {
    Arc::new(ReqwestFetcher::new("TestBot/1.0").unwrap())
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

// ===== Scripted fetcher =====

#[derive(Clone)]
enum Scripted {
    Html(String),
    Status(u16),
    /// Fails with a timeout this many times, then serves the HTML
    Flaky(u32, String),
    /// Connection refused on every attempt
    Refused,
}

#[derive(Default)]
struct ScriptedFetcher {
    pages: HashMap<String, Scripted>,
    assets: HashMap<String, (Option<u64>, Vec<u8>)>,
    failures: AtomicU32,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn page(mut self, url: &str, page: Scripted) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    fn asset(mut self, url: &str, advertised: Option<u64>, bytes: Vec<u8>) -> Self {
        self.assets.insert(url.to_string(), (advertised, bytes));
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn requested_count(&self, url: &str) -> usize {
        self.requested().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &Url, _timeout: Duration) -> Result<RawPage, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        let respond = |status: u16, body: String| RawPage {
            status,
            body,
            final_url: url.clone(),
            content_type: Some("text/html".to_string()),
        };

        match self.pages.get(url.as_str()) {
            Some(Scripted::Html(body)) => Ok(respond(200, body.clone())),
            Some(Scripted::Status(status)) => Ok(respond(*status, String::new())),
            Some(Scripted::Flaky(times, body)) => {
                if self.failures.fetch_add(1, Ordering::SeqCst) < *times {
                    Err(FetchError::Timeout { url: url.to_string() })
                } else {
                    Ok(respond(200, body.clone()))
                }
            }
            Some(Scripted::Refused) => Err(FetchError::Connect {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
            None => Ok(respond(404, String::new())),
        }
    }

    async fn probe(&self, url: &Url, _timeout: Duration) -> Result<AssetProbe, FetchError> {
        let advertised = self.assets.get(url.as_str()).and_then(|(len, _)| *len);
        Ok(AssetProbe {
            status: 200,
            content_type: Some("application/pdf".to_string()),
            content_length: advertised,
        })
    }

    async fn download(
        &self,
        url: &Url,
        _timeout: Duration,
        max_bytes: u64,
    ) -> Result<AssetBody, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.assets.get(url.as_str()) {
            Some((_, bytes)) => Ok(AssetBody {
                status: 200,
                content_type: Some("application/pdf".to_string()),
                bytes: bytes.clone(),
                over_limit: bytes.len() as u64 > max_bytes,
            }),
            None => Ok(AssetBody {
                status: 404,
                content_type: None,
                bytes: Vec::new(),
                over_limit: false,
            }),
        }
    }
}

// ===== End-to-end over HTTP =====

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
        .expect(1)
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/docs/index",
        doc_page("Home", &[format!("{}/docs/page1", base), "page2".to_string()]),
    )
    .await;
    mount_page(&server, "/docs/page1", doc_page("Page 1", &["index".to_string()])).await;
    mount_page(&server, "/docs/page2", doc_page("Page 2", &[])).await;

    let config = create_test_config(&format!("{}/docs/index", base));
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::Processed), 3);
    assert_eq!(
        sink.page_urls(),
        vec![
            format!("{}/docs/index", base),
            format!("{}/docs/page1", base),
            format!("{}/docs/page2", base),
        ]
    );

    let home = &sink.pages[0];
    assert_eq!(home.title.as_deref(), Some("Home"));
    assert_eq!(home.depth, 0);
    assert_eq!(home.links.len(), 2);
    assert_eq!(home.classification.kind.as_str(), "documentation");
    assert_eq!(sink.pages[1].depth, 1);
}

#[tokio::test]
async fn test_robots_disallowed_path_is_never_fetched() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/"),
        )
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/docs/index",
        doc_page("Home", &["/docs/public".to_string(), "/private/docs/secret".to_string()]),
    )
    .await;
    mount_page(&server, "/docs/public", doc_page("Public", &[])).await;
    Mock::given(method("GET"))
        .and(path("/private/docs/secret"))
        .respond_with(html(doc_page("Secret", &[])))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/docs/index", base));
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::Disallowed), 1);
    assert_eq!(stats.count(PageState::Processed), 2);
    assert!(sink.find_page(&format!("{}/private/docs/secret", base)).is_none());
}

#[tokio::test]
async fn test_robots_disallowed_directory_link_is_never_fetched() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/"),
        )
        .mount(&server)
        .await;

    mount_page(&server, "/docs/index", doc_page("Home", &["/private/".to_string()])).await;
    Mock::given(method("GET"))
        .and(path("/private/"))
        .respond_with(html(doc_page("Secret", &[])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/private/", base).as_str()),
        )
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/docs/index", base));
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::Disallowed), 1);
    assert_eq!(sink.page_urls(), vec![format!("{}/docs/index", base)]);
}

#[tokio::test]
async fn test_redirect_into_disallowed_path_is_not_stored() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/"),
        )
        .mount(&server)
        .await;

    mount_page(&server, "/docs/index", doc_page("Home", &["/docs/moved".to_string()])).await;
    Mock::given(method("GET"))
        .and(path("/docs/moved"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", format!("{}/private/docs/page", base).as_str()),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/private/docs/page", doc_page("Secret", &["/docs/leak".to_string()])).await;

    let config = create_test_config(&format!("{}/docs/index", base));
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::Disallowed), 1);
    assert_eq!(sink.pages.len(), 1);
    assert!(!crawler.scheduler().is_visited(&Url::parse(&format!("{}/docs/leak", base)).unwrap()));
}

#[tokio::test]
async fn test_robots_connection_refused_allows_everything() {
    let start = "https://docs.example.com/docs/index";
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .page("https://docs.example.com/robots.txt", Scripted::Refused)
            .page(start, Scripted::Html(doc_page("Home", &["/docs/a".to_string()])))
            .page("https://docs.example.com/docs/a", Scripted::Html(doc_page("A", &[]))),
    );

    let config = create_test_config(start);
    let mut crawler = Crawler::new(config, fetcher.clone()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(fetcher.requested_count("https://docs.example.com/robots.txt"), 1);
    assert_eq!(stats.count(PageState::Disallowed), 0);
    assert_eq!(stats.count(PageState::Processed), 2);
}

#[tokio::test]
async fn test_robots_unavailable_allows_everything() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    mount_page(&server, "/docs/index", doc_page("Home", &["/docs/a".to_string()])).await;
    mount_page(&server, "/docs/a", doc_page("A", &[])).await;

    let config = create_test_config(&format!("{}/docs/index", base));
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::Processed), 2);
    assert_eq!(stats.count(PageState::Disallowed), 0);
}

#[tokio::test]
async fn test_depth_one_stops_after_first_hop() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/docs/start", doc_page("Start", &["/docs/a".to_string()])).await;
    mount_page(&server, "/docs/a", doc_page("A", &["/docs/b".to_string()])).await;
    Mock::given(method("GET"))
        .and(path("/docs/b"))
        .respond_with(html(doc_page("B", &[])))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{}/docs/start", base));
    config.max_depth = 1;
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    crawler.run(&mut sink).await.unwrap();

    assert_eq!(sink.pages.len(), 2);
    assert!(sink.pages.iter().all(|p| p.depth <= 1));
}

#[tokio::test]
async fn test_each_url_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    // a <-> b cycle plus several spellings of the same URL
    for (page_path, links) in [
        ("/docs/a", vec!["/docs/b", "/docs//b", "/docs/./b#top", "/docs/a?ref=self"]),
        ("/docs/b", vec!["/docs/a", "/DOCS/../docs/a"]),
    ] {
        let links: Vec<String> = links.into_iter().map(String::from).collect();
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(html(doc_page(page_path, &links)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = create_test_config(&format!("{}/docs/a", base));
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::Processed), 2);
}

#[tokio::test]
async fn test_max_pages_bounds_visits() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: Vec<String> = (1..=5).map(|i| format!("/docs/p{}", i)).collect();
    mount_page(&server, "/docs/index", doc_page("Home", &links)).await;
    for link in &links {
        mount_page(&server, link, doc_page(link, &[])).await;
    }

    let mut config = create_test_config(&format!("{}/docs/index", base));
    config.max_pages = 3;
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.pages_visited(), 3);
    assert_eq!(crawler.scheduler().visited_count(), 3);
    assert_eq!(sink.pages.len(), 3);
}

#[tokio::test]
async fn test_requests_respect_rate_limit() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: Vec<String> = (1..=3).map(|i| format!("/docs/p{}", i)).collect();
    mount_page(&server, "/docs/index", doc_page("Home", &links)).await;
    for link in &links {
        mount_page(&server, link, doc_page(link, &[])).await;
    }

    let mut config = create_test_config(&format!("{}/docs/index", base));
    config.requests_per_second = 10.0;
    config.delay_between_requests = 0.1;
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let start = Instant::now();
    let stats = crawler.run(&mut sink).await.unwrap();
    let elapsed = start.elapsed();

    // Four page fetches need at least three full intervals
    assert_eq!(stats.pages_fetched(), 4);
    assert!(
        elapsed >= Duration::from_millis(300),
        "crawl finished in {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_robots_crawl_delay_slows_requests() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nCrawl-delay: 0.2"))
        .mount(&server)
        .await;
    mount_page(&server, "/docs/index", doc_page("Home", &["/docs/a".to_string()])).await;
    mount_page(&server, "/docs/a", doc_page("A", &[])).await;

    let config = create_test_config(&format!("{}/docs/index", base));
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let start = Instant::now();
    crawler.run(&mut sink).await.unwrap();

    assert_eq!(sink.pages.len(), 2);
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/docs/index", doc_page("Home", &["/docs/missing".to_string()])).await;
    Mock::given(method("GET"))
        .and(path("/docs/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config(&format!("{}/docs/index", base));
    config.retry_attempts = 3;
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::DeadLink), 1);
    assert_eq!(stats.count(PageState::Processed), 1);
}

#[tokio::test]
async fn test_too_many_requests_is_recorded() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/docs/index", doc_page("Home", &["/docs/busy".to_string()])).await;
    Mock::given(method("GET"))
        .and(path("/docs/busy"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{}/docs/index", base));
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::RateLimited), 1);
}

#[tokio::test]
async fn test_results_stored_in_sqlite() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/docs/index", doc_page("Home", &["/docs/a".to_string()])).await;
    mount_page(&server, "/docs/a", doc_page("A", &["https://elsewhere.example/".to_string()])).await;

    let dir = tempfile::tempdir().unwrap();
    let mut sink = SqliteSink::open(&dir.path().join("crawl.db")).unwrap();
    sink.start_run("test-hash").unwrap();

    let config = create_test_config(&format!("{}/docs/index", base));
    let mut crawler = Crawler::new(config, http_fetcher()).unwrap();
    crawler.run(&mut sink).await.unwrap();

    assert_eq!(sink.count_pages().unwrap(), 2);
    assert_eq!(sink.count_links().unwrap(), 2);
}

// ===== Scripted scenarios =====

#[tokio::test]
async fn test_domain_filter_keeps_allowed_links() {
    let start = "http://localhost:8080/docs/index";
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .page(
                start,
                Scripted::Html(doc_page(
                    "Home",
                    &[
                        "http://localhost:8080/page1".to_string(),
                        "http://localhost:8080/page2".to_string(),
                        "http://external.com/".to_string(),
                    ],
                )),
            )
            .page("http://localhost:8080/page1", Scripted::Html(plain_page(&[])))
            .page("http://localhost:8080/page2", Scripted::Html(plain_page(&[]))),
    );

    let mut config = create_test_config(start);
    config.allowed_domains = vec!["localhost".to_string()];
    config.respect_robots_txt = false;
    let mut crawler = Crawler::new(config, fetcher.clone()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.links_enqueued, 3);
    assert_eq!(fetcher.requested_count("http://localhost:8080/page1"), 1);
    assert_eq!(fetcher.requested_count("http://localhost:8080/page2"), 1);
    assert!(!fetcher.requested().iter().any(|u| u.contains("external.com")));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let start = "https://docs.example.com/docs/index";
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .page("https://docs.example.com/robots.txt", Scripted::Status(404))
            .page(start, Scripted::Flaky(2, doc_page("Home", &[]))),
    );

    let mut config = create_test_config(start);
    config.retry_attempts = 3;
    let mut crawler = Crawler::new(config, fetcher.clone()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::Processed), 1);
    assert_eq!(fetcher.requested_count(start), 3);
}

#[tokio::test]
async fn test_exhausted_retries_mark_unreachable() {
    let start = "https://docs.example.com/docs/index";
    let fetcher = Arc::new(
        ScriptedFetcher::default().page(start, Scripted::Flaky(10, doc_page("Home", &[]))),
    );

    let mut config = create_test_config(start);
    config.retry_attempts = 2;
    config.respect_robots_txt = false;
    let mut crawler = Crawler::new(config, fetcher.clone()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::Unreachable), 1);
    assert_eq!(fetcher.requested_count(start), 2);
    assert!(sink.pages.is_empty());
}

#[tokio::test]
async fn test_rejected_page_links_are_followed() {
    let start = "https://example.com/";
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .page(start, Scripted::Html(plain_page(&["/docs/guide".to_string()])))
            .page(
                "https://example.com/docs/guide",
                Scripted::Html(doc_page("Guide", &[])),
            ),
    );

    let mut config = create_test_config(start);
    config.respect_robots_txt = false;
    let mut crawler = Crawler::new(config, fetcher).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.count(PageState::Rejected), 1);
    assert_eq!(sink.page_urls(), vec!["https://example.com/docs/guide"]);
}

#[tokio::test]
async fn test_oversized_asset_is_not_written() {
    let start = "https://example.com/docs/index";
    let big = "https://example.com/files/big.pdf";
    let small = "https://example.com/files/small.pdf";
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .page(
                start,
                Scripted::Html(doc_page("Home", &[big.to_string(), small.to_string()])),
            )
            .asset(big, Some(20_000_000), Vec::new())
            .asset(small, Some(4), b"%PDF".to_vec()),
    );

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(start);
    config.respect_robots_txt = false;
    config.download_assets = true;
    config.max_asset_size = 10 * 1024 * 1024;
    config.asset_dir = dir.path().to_path_buf();
    config.max_pages = 1;
    let mut crawler = Crawler::new(config, fetcher.clone()).unwrap();
    let mut sink = MemorySink::new();

    let stats = crawler.run(&mut sink).await.unwrap();

    assert_eq!(stats.assets_downloaded, 1);
    assert_eq!(stats.assets_failed, 1);
    assert_eq!(fetcher.requested_count(big), 0);

    let page = sink.find_page(start).unwrap();
    let big_asset = page.assets.iter().find(|a| a.url.as_str() == big).unwrap();
    assert!(!big_asset.downloaded);
    assert!(big_asset.local_path.is_none());
    assert!(big_asset.error.as_deref().unwrap().contains("too large"));

    let small_asset = page.assets.iter().find(|a| a.url.as_str() == small).unwrap();
    assert!(small_asset.downloaded);
    assert_eq!(small_asset.size, 4);

    // Only the small asset reached the disk
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    // Assets were also reported to the sink, before the page
    assert_eq!(sink.assets.len(), 2);
}
