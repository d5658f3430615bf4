mod common;

use applymate::scraping::fetcher::BROWSER_USER_AGENT;
use applymate::scraping::{HttpFetcher, ScrapingAdapter, SourceAdapter, SourceError};
use applymate::SearchQuery;
use common::{board_spec, card, page};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn adapter(server: &MockServer, timeout: Duration) -> ScrapingAdapter {
    let fetcher = Arc::new(HttpFetcher::new(timeout).unwrap());
    ScrapingAdapter::new(board_spec("MockBoard", &server.base_url()), fetcher).unwrap()
}

#[tokio::test]
async fn test_scrapes_listings_with_browser_user_agent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .header("user-agent", BROWSER_USER_AGENT);
            then.status(200)
                .header("content-type", "text/html")
                .body(page(&[
                    card("Rust Engineer", "Acme", "Bangalore", "/jobs/1"),
                    card("Rust Intern", "Globex", "Pune", "https://elsewhere.example/2"),
                ]));
        })
        .await;

    let listings = adapter(&server, Duration::from_secs(5))
        .search(&SearchQuery::new("Rust Engineer"))
        .await;

    mock.assert_async().await;
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].link, format!("{}/jobs/1", server.base_url()));
    assert_eq!(listings[1].link, "https://elsewhere.example/2");
    assert_eq!(listings[0].source, "MockBoard");
}

#[tokio::test]
async fn test_location_is_sent_and_applied() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/search").query_param("l", "pune");
            then.status(200).body(page(&[
                card("Rust Engineer", "Acme", "Bangalore", "/jobs/1"),
                card("Rust Intern", "Globex", "Pune, Maharashtra", "/jobs/2"),
            ]));
        })
        .await;

    let query = SearchQuery::new("Rust").with_location("Pune");
    let listings = adapter(&server, Duration::from_secs(5)).search(&query).await;

    mock.assert_async().await;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].company, "Globex");
}

#[tokio::test]
async fn test_server_error_yields_empty_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(503).body("maintenance");
        })
        .await;

    let adapter = adapter(&server, Duration::from_secs(5));
    let query = SearchQuery::new("Rust");

    let err = adapter.try_search(&query).await.unwrap_err();
    assert!(matches!(err, SourceError::Fetch(_)));
    assert!(err.to_string().contains("503"));
    assert!(adapter.search(&query).await.is_empty());
}

#[tokio::test]
async fn test_slow_source_times_out_to_empty_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200)
                .delay(Duration::from_secs(3))
                .body(page(&[card("Rust Engineer", "Acme", "Remote", "/1")]));
        })
        .await;

    let adapter = adapter(&server, Duration::from_millis(300));
    let query = SearchQuery::new("Rust");

    let err = adapter.try_search(&query).await.unwrap_err();
    assert!(err.to_string().contains("timed out"));
    assert!(adapter.search(&query).await.is_empty());
}
