//! # Page Fetcher Tests
//!
//! Verifies retry behavior of the scrape client against a mock HTTP server.

mod common;

use common::setup_tracing;
use pagelift::errors::FetchError;
use pagelift::fetch::PageFetcher;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer) -> PageFetcher {
    PageFetcher::new(format!("{}/v1/extract", server.uri()), "scrape-key".to_string())
        .unwrap()
        .with_backoff_base(Duration::from_millis(5))
}

#[tokio::test]
async fn success_on_first_attempt_makes_one_request() {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/extract"))
        .and(body_partial_json(json!({"browserHtml": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"browserHtml": "<html>ok</html>"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let html = fetcher_for(&server)
        .fetch("https://shop.example/p/1")
        .await
        .unwrap();
    assert_eq!(html, "<html>ok</html>");
}

#[tokio::test]
async fn transient_failure_is_retried_until_success() {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/extract"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/extract"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"browserHtml": "<html>late</html>"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let html = fetcher_for(&server)
        .fetch("https://shop.example/p/2")
        .await
        .unwrap();
    assert_eq!(html, "<html>late</html>");
}

#[tokio::test]
async fn missing_browser_html_counts_as_a_failure() {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/extract"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"statusCode": 200})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/extract"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"browserHtml": "<html>ok</html>"})),
        )
        .mount(&server)
        .await;

    let html = fetcher_for(&server)
        .fetch("https://shop.example/p/3")
        .await
        .unwrap();
    assert_eq!(html, "<html>ok</html>");
}

#[tokio::test]
async fn exhausted_retries_fail_with_the_url() {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/extract"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(5)
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch("https://shop.example/p/4")
        .await
        .unwrap_err();

    match err {
        FetchError::Exhausted { url, attempts } => {
            assert_eq!(url, "https://shop.example/p/4");
            assert_eq!(attempts, 5);
        }
        other => panic!("Expected Exhausted, got {other:?}"),
    }
}
