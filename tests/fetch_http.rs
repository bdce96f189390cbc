//! Fetcher tests against a local wiremock server — no real network traffic.

use std::time::Duration;

use wiremock::matchers::{headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use feed_digest::config::RunDefaults;
use feed_digest::error::FeedError;
use feed_digest::fetch::{build_client, fetch_feed_body};

fn client() -> reqwest::Client {
    build_client(&RunDefaults::default()).expect("failed to build test client")
}

#[tokio::test]
async fn success_returns_the_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<rss version=\"2.0\"/>"))
        .mount(&server)
        .await;

    let body = fetch_feed_body(
        &client(),
        &format!("{}/feed.xml", server.uri()),
        Duration::from_secs(5),
    )
    .await
    .unwrap();

    assert_eq!(body, "<rss version=\"2.0\"/>");
}

#[tokio::test]
async fn sends_a_feed_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .and(headers(
            "accept",
            vec![
                "application/rss+xml",
                "application/atom+xml",
                "application/xml;q=0.9",
                "text/xml;q=0.9",
                "text/html;q=0.8",
            ],
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    fetch_feed_body(
        &client(),
        &format!("{}/feed.xml", server.uri()),
        Duration::from_secs(5),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn non_2xx_maps_to_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetch_feed_body(
        &client(),
        &format!("{}/gone.xml", server.uri()),
        Duration::from_secs(5),
    )
    .await
    .unwrap_err();

    assert!(
        matches!(err, FeedError::Status { status: 404, .. }),
        "expected Status, got: {err:?}"
    );
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<rss/>")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = fetch_feed_body(
        &client(),
        &format!("{}/slow.xml", server.uri()),
        Duration::from_millis(200),
    )
    .await
    .unwrap_err();

    assert!(
        matches!(err, FeedError::Timeout),
        "expected Timeout, got: {err:?}"
    );
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Bind a port, then drop the listener so connecting to it is refused.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = fetch_feed_body(
        &client(),
        &format!("http://127.0.0.1:{port}/feed.xml"),
        Duration::from_secs(5),
    )
    .await
    .unwrap_err();

    assert!(
        matches!(err, FeedError::Http(_)),
        "expected Http, got: {err:?}"
    );
}
