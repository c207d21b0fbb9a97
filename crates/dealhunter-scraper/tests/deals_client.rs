//! Integration tests for `DealsClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dealhunter_scraper::{DealsClient, ScraperError};

fn test_client() -> DealsClient {
    DealsClient::new(5, "dealhunter-test/0.1").expect("failed to build test DealsClient")
}

#[tokio::test]
async fn try_fetch_returns_body_on_200() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/amazon"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let result = client
        .try_fetch(&format!("{}/store/amazon?page=1", server.uri()))
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap(), "<html>ok</html>");
}

#[tokio::test]
async fn try_fetch_reports_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/store/nowhere?page=1", server.uri());
    let result = test_client().try_fetch(&url).await;

    match result {
        Err(ScraperError::UnexpectedStatus { status, url: got }) => {
            assert_eq!(status, 404);
            assert_eq!(got, url);
        }
        other => panic!("expected ScraperError::UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn try_fetch_treats_non_200_success_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = test_client().try_fetch(&server.uri()).await;
    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 204, .. })),
        "expected UnexpectedStatus(204), got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_page_swallows_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_client()
        .fetch_page(&format!("{}/popular-deals", server.uri()))
        .await;
    assert!(body.is_none(), "expected None for a 503 response");
}

#[tokio::test]
async fn fetch_page_swallows_transport_errors() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let body = test_client().fetch_page(&format!("{uri}/hot-deals-online")).await;
    assert!(body.is_none(), "expected None when nothing is listening");
}

#[tokio::test]
async fn fetch_page_does_not_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let _ = test_client().fetch_page(&server.uri()).await;
}
