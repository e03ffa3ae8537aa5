//! HTTP fetcher tests against wiremock servers

use spindrift::crawler::{crawl, FetchError, Fetcher, HttpFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_AGENT: &str = "spindrift-test/0.1";

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string().into_bytes(), "text/html")
}

#[tokio::test]
async fn fetches_page_and_extracts_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<html><body>
            <a href="{}/page1">One</a>
            <a href="/page2">Two</a>
            <a href="mailto:x@demo.test">skip</a>
            </body></html>"#,
            base
        )))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(TEST_AGENT).unwrap();
    let page = fetcher.fetch(&format!("{}/", base)).await.unwrap();

    assert!(page.content.contains("One"));
    assert_eq!(
        page.links,
        vec![format!("{}/page1", base), format!("{}/page2", base)]
    );
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let server = MockServer::start().await;

    let fetcher = HttpFetcher::new(TEST_AGENT).unwrap();
    let err = fetcher
        .fetch(&format!("{}/nowhere", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::NotFound { .. }));
}

#[tokio::test]
async fn server_error_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(TEST_AGENT).unwrap();
    let err = fetcher
        .fetch(&format!("{}/broken", server.uri()))
        .await
        .unwrap_err();

    match err {
        FetchError::Status { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_html_content_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"{}".to_vec(), "application/json"),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(TEST_AGENT).unwrap();
    let err = fetcher
        .fetch(&format!("{}/data.json", server.uri()))
        .await
        .unwrap_err();

    match err {
        FetchError::ContentMismatch { content_type, .. } => {
            assert!(content_type.contains("application/json"));
        }
        other => panic!("expected ContentMismatch error, got {:?}", other),
    }
}

#[tokio::test]
async fn live_crawl_respects_depth_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    // A chain: / -> /level1 -> /level2 -> /level3
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<html><body><a href="{}/level1">next</a></body></html>"#,
            base
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level1"))
        .respond_with(html_page(&format!(
            r#"<html><body><a href="{}/level2">next</a></body></html>"#,
            base
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(html_page(&format!(
            r#"<html><body><a href="{}/level3">next</a></body></html>"#,
            base
        )))
        .expect(1)
        .mount(&server)
        .await;

    // The level3 task starts with an empty depth budget and never fetches.
    Mock::given(method("GET"))
        .and(path("/level3"))
        .respond_with(html_page("<html><body>deep</body></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(TEST_AGENT).unwrap();
    let report = crawl(fetcher, &format!("{}/", base), 3).await;

    assert_eq!(report.pages.len(), 3);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn live_crawl_handles_cycles() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<html><body><a href="{0}/a">a</a><a href="{0}/b">b</a></body></html>"#,
            base
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page(&format!(
            r#"<html><body><a href="{}/">home</a></body></html>"#,
            base
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page("<html><body>leaf</body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(TEST_AGENT).unwrap();
    let report = crawl(fetcher, &format!("{}/", base), 4).await;

    assert_eq!(report.pages.len(), 3);
    assert!(report.failures.is_empty());
}
