//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run full crawls
//! through the reqwest-backed fetcher.

use ripple_crawl::config::{HttpConfig, UserAgentConfig};
use ripple_crawl::crawler::{crawl, CrawlRequest, Fetcher, HttpFetcher};
use ripple_crawl::{PageResult, TaskOutcome};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

fn test_fetcher() -> Arc<dyn Fetcher> {
    let http = HttpConfig {
        timeout_secs: 5,
        connect_timeout_secs: 2,
    };
    Arc::new(HttpFetcher::from_config(&test_user_agent(), &http).expect("Failed to build client"))
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn url_set(pages: &[PageResult]) -> HashSet<String> {
    pages.iter().map(|p| p.url.clone()).collect()
}

fn expected(urls: &[String]) -> HashSet<String> {
    urls.iter().cloned().collect()
}

async fn run(start_url: &str, depth: i32) -> (Vec<PageResult>, ripple_crawl::CrawlStats) {
    let handle = crawl(test_fetcher(), CrawlRequest::new(start_url, depth));
    tokio::time::timeout(Duration::from_secs(30), handle.collect())
        .await
        .expect("Crawl did not terminate")
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/page1">One</a><a href="page2">Two</a></body></html>"#,
        1,
    )
    .await;
    mount_page(
        &server,
        "/page1",
        r#"<html><body><a href="/">Home</a><a href="/page2">Two</a></body></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/page2", "<html><body>Leaf</body></html>", 1).await;

    let (pages, stats) = run(&base, 3).await;

    assert_eq!(
        url_set(&pages),
        expected(&[
            base.clone(),
            format!("{}/page1", base),
            format!("{}/page2", base),
        ])
    );
    assert_eq!(pages.len(), 3);
    assert_eq!(stats.pages_emitted(), 3);
    assert_eq!(stats.tasks_started, stats.tasks_finished);
}

#[tokio::test]
async fn test_depth_one_fetches_only_start_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/child">Child</a>"#, 1).await;
    mount_page(&server, "/child", "never fetched", 0).await;

    let (pages, stats) = run(&base, 1).await;

    assert_eq!(url_set(&pages), expected(&[base.clone()]));
    assert_eq!(stats.count(TaskOutcome::DepthExhausted), 1);
}

#[tokio::test]
async fn test_depth_zero_makes_no_requests() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", "never fetched", 0).await;

    let (pages, stats) = run(&base, 0).await;

    assert!(pages.is_empty());
    assert_eq!(stats.tasks_started, 1);
    assert_eq!(stats.tasks_finished, 1);
}

#[tokio::test]
async fn test_links_across_hosts() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;
    let site_base = site.uri();
    let other_base = other.uri();

    // Start page links to /x on itself and /y on another host; /x links back
    // home and to /z, which would be at depth zero
    mount_page(
        &site,
        "/",
        &format!(
            r#"<a href="{}/x">x</a><a href="{}/y">y</a>"#,
            site_base, other_base
        ),
        1,
    )
    .await;
    mount_page(
        &site,
        "/x",
        &format!(r#"<a href="{}">home</a><a href="/z">z</a>"#, site_base),
        1,
    )
    .await;
    mount_page(&site, "/z", "too deep", 0).await;
    mount_page(&other, "/y", "<p>other host</p>", 1).await;

    let (pages, _) = run(&site_base, 2).await;

    assert_eq!(
        url_set(&pages),
        expected(&[
            site_base.clone(),
            format!("{}/x", site_base),
            format!("{}/y", other_base),
        ])
    );
}

#[tokio::test]
async fn test_error_status_body_still_emitted() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/missing">Missing</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"Not here, try <a href="/found">this</a>"#),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/found", "found it", 1).await;

    let (pages, _) = run(&base, 3).await;

    let missing = pages
        .iter()
        .find(|p| p.url == format!("{}/missing", base))
        .expect("404 page was not emitted");
    assert!(missing.body.starts_with("Not here"));
    assert!(url_set(&pages).contains(&format!("{}/found", base)));
}

#[tokio::test]
async fn test_transport_failure_isolated() {
    let server = MockServer::start().await;
    let base = server.uri();

    // A port with nothing listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_port = listener.local_addr().unwrap().port();
    drop(listener);

    mount_page(
        &server,
        "/",
        &format!(
            r#"<a href="http://127.0.0.1:{}/gone">gone</a><a href="/alive">alive</a>"#,
            dead_port
        ),
        1,
    )
    .await;
    mount_page(&server, "/alive", r#"<a href="/alive/child">child</a>"#, 1).await;
    mount_page(&server, "/alive/child", "leaf", 1).await;

    let (pages, stats) = run(&base, 3).await;

    assert_eq!(
        url_set(&pages),
        expected(&[
            base.clone(),
            format!("{}/alive", base),
            format!("{}/alive/child", base),
        ])
    );
    assert_eq!(stats.count(TaskOutcome::TransportFailed), 1);
    assert_eq!(stats.tasks_started, stats.tasks_finished);
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(html("<p>hello</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let (pages, _) = run(&base, 1).await;

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].body, "<p>hello</p>");
}

#[tokio::test]
async fn test_slow_siblings_all_complete() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: String = (0..20)
        .map(|i| format!(r#"<a href="/slow/{}">{}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", &links, 1).await;
    for i in 0..20 {
        Mock::given(method("GET"))
            .and(path(format!("/slow/{}", i)))
            .respond_with(
                html(r#"<a href="/">home</a>"#).set_delay(Duration::from_millis(10 * (i % 5))),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let (pages, stats) = run(&base, 2).await;

    assert_eq!(pages.len(), 21);
    assert_eq!(stats.tasks_started, 41);
    assert_eq!(stats.tasks_finished, 41);
    assert_eq!(stats.count(TaskOutcome::DepthExhausted), 20);
}
