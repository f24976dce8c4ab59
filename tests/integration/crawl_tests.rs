//! Integration tests for the crawler
//!
//! These tests use wiremock to serve real HTML over HTTP, and in-memory page
//! graphs to exercise the engine at a larger scale.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordcrawl::config::{load_config, UserAgentConfig};
use wordcrawl::output::write_result;
use wordcrawl::page::{HttpPageSource, StaticPageSource};
use wordcrawl::url::PatternList;
use wordcrawl::crawler::MAX_CRAWL_DEPTH;
use wordcrawl::{CrawlResult, ParallelCrawler};

/// Starts a mock server on a runtime owned by the test
///
/// The crawl itself must run outside any tokio runtime, so the test body stays
/// synchronous and only server setup goes through `block_on`.
fn start_server() -> (Runtime, MockServer) {
    let runtime = Runtime::new().expect("Failed to create runtime");
    let server = runtime.block_on(MockServer::start());
    (runtime, server)
}

fn mount_html(runtime: &Runtime, server: &MockServer, route: &str, body: String) {
    let mock = Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"));
    runtime.block_on(mock.mount(server));
}

fn html(body: &str) -> String {
    format!("<html><head><title>ignored</title></head><body>{}</body></html>", body)
}

fn http_crawler(
    ignored_urls: &[String],
    ignored_words: &[&str],
    max_depth: u32,
) -> ParallelCrawler {
    let source = HttpPageSource::with_timeout(
        &UserAgentConfig::default(),
        PatternList::new(ignored_words).unwrap(),
        Duration::from_secs(5),
    )
    .expect("Failed to build HTTP source");

    ParallelCrawler::builder(Arc::new(source))
        .timeout(Duration::from_secs(60))
        .max_depth(max_depth)
        .parallelism(4)
        .popular_word_count(10)
        .ignored_urls(ignored_urls)
        .build()
        .expect("Failed to build crawler")
}

#[test]
fn test_http_crawl_counts_words_across_pages() {
    let (runtime, server) = start_server();
    let base = server.uri();

    mount_html(
        &runtime,
        &server,
        "/",
        html(&format!(
            r#"<p>rust crawler</p><a href="{base}/b"></a><a href="/c"></a>"#
        )),
    );
    mount_html(
        &runtime,
        &server,
        "/b",
        html(r#"<p>Rust, rust and more rust.</p><a href="/"></a>"#),
    );
    mount_html(&runtime, &server, "/c", html("<p>crawler</p>"));

    let result = http_crawler(&[], &[], 3)
        .crawl(&[format!("{base}/")])
        .unwrap();

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(
        result.word_counts(),
        &[
            ("rust".to_string(), 4),
            ("crawler".to_string(), 2),
            ("and".to_string(), 1),
            ("more".to_string(), 1),
        ]
    );
}

#[test]
fn test_http_failure_is_isolated() {
    let (runtime, server) = start_server();
    let base = server.uri();

    mount_html(
        &runtime,
        &server,
        "/",
        html(r#"<p>start</p><a href="/missing"></a><a href="/ok"></a><a href="/file"></a>"#),
    );
    mount_html(&runtime, &server, "/ok", html("<p>reachable</p>"));
    let pdf = Mock::given(method("GET"))
        .and(path("/file"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF words", "application/pdf"));
    runtime.block_on(pdf.mount(&server));
    // "/missing" has no mock, so wiremock answers 404

    let result = http_crawler(&[], &[], 2)
        .crawl(&[format!("{base}/")])
        .unwrap();

    // Failed URLs are still claimed, they just contribute no words
    assert_eq!(result.urls_visited(), 4);
    assert_eq!(result.word_count("start"), Some(1));
    assert_eq!(result.word_count("reachable"), Some(1));
    assert_eq!(result.word_count("pdf"), None);
    assert_eq!(result.word_count("words"), None);
}

#[test]
fn test_http_ignored_urls_and_words() {
    let (runtime, server) = start_server();
    let base = server.uri();

    mount_html(
        &runtime,
        &server,
        "/",
        html(r#"<p>the public index</p><a href="/private/a"></a><a href="/public"></a>"#),
    );
    mount_html(&runtime, &server, "/public", html("<p>the public page</p>"));
    mount_html(&runtime, &server, "/private/a", html("<p>secret</p>"));

    let ignored_urls = vec![format!("{}/private/.*", regex::escape(&base))];
    let result = http_crawler(&ignored_urls, &["the"], 2)
        .crawl(&[format!("{base}/")])
        .unwrap();

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(result.word_count("public"), Some(2));
    assert_eq!(result.word_count("secret"), None);
    assert_eq!(result.word_count("the"), None);
}

#[test]
fn test_config_file_to_result_file() {
    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(
            br#"
start-pages = ["https://a.test/"]
ignored-urls = ["https://c\\.test/.*"]

[crawler]
max-depth = 2
timeout-seconds = 60
parallelism = 2
popular-word-count = 1
"#,
        )
        .unwrap();

    let config = load_config(config_file.path()).unwrap();
    let source = StaticPageSource::new()
        .with_page(
            "https://a.test/",
            &[("x", 1), ("z", 1)],
            &["https://b.test/", "https://c.test/page"],
        )
        .with_page("https://b.test/", &[("x", 2)], &[])
        .with_page("https://c.test/page", &[("z", 10)], &[]);

    let result = ParallelCrawler::from_config(&config, Arc::new(source))
        .unwrap()
        .crawl(&config.start_pages)
        .unwrap();

    assert_eq!(result, CrawlResult::new(vec![("x".to_string(), 3)], 2));

    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("result.json");
    write_result(&result, &out_path).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(
        written,
        serde_json::json!({ "wordCounts": { "x": 3 }, "urlsVisited": 2 })
    );
}

/// Builds a graph of `size` pages where page i links to the next `fan_out` pages
fn ring_graph(size: usize, fan_out: usize) -> StaticPageSource {
    let urls: Vec<String> = (0..size).map(|i| format!("https://ring.test/{i}")).collect();

    urls.iter().enumerate().fold(StaticPageSource::new(), |source, (i, url)| {
        let links: Vec<&str> = (1..=fan_out)
            .map(|step| urls[(i + step) % size].as_str())
            .collect();
        source.with_page(url, &[("page", 1), ("ring", 2)], &links)
    })
}

#[test]
fn test_large_graph_fetches_every_page_once() {
    let size = 60;
    let source = Arc::new(ring_graph(size, 4));

    let result = ParallelCrawler::builder(source.clone())
        .timeout(Duration::from_secs(600))
        .max_depth(size as u32)
        .parallelism(8)
        .popular_word_count(5)
        .build()
        .unwrap()
        .crawl(&["https://ring.test/0", "https://ring.test/30"])
        .unwrap();

    assert_eq!(result.urls_visited(), size);
    assert_eq!(source.total_fetches(), size);
    for i in 0..size {
        assert_eq!(source.fetch_count(&format!("https://ring.test/{i}")), 1);
    }
    assert_eq!(
        result.word_counts(),
        &[("ring".to_string(), 2 * size as u64), ("page".to_string(), size as u64)]
    );
}

#[test]
fn test_parallelism_does_not_change_the_result() {
    let crawl_with = |parallelism: usize| {
        ParallelCrawler::builder(Arc::new(ring_graph(40, 3)))
            .timeout(Duration::from_secs(600))
            .max_depth(40)
            .parallelism(parallelism)
            .popular_word_count(10)
            .build()
            .unwrap()
            .crawl(&["https://ring.test/7"])
            .unwrap()
    };

    assert_eq!(crawl_with(1), crawl_with(8));
}

#[test]
fn test_link_chain_at_depth_ceiling() {
    let size = MAX_CRAWL_DEPTH as usize;
    let source = Arc::new(ring_graph(size, 1));

    let result = ParallelCrawler::builder(source.clone())
        .timeout(Duration::from_secs(600))
        .max_depth(MAX_CRAWL_DEPTH)
        .parallelism(1)
        .popular_word_count(1)
        .build()
        .unwrap()
        .crawl(&["https://ring.test/0"])
        .unwrap();

    assert_eq!(result.urls_visited(), size);
    assert_eq!(source.total_fetches(), size);
    assert_eq!(result.word_counts(), &[("ring".to_string(), 2 * size as u64)]);
}
