//! Async client page loads and cancellation.

#![cfg(feature = "async")]

mod common;

use franchise_insights::{AsyncFranchiseClient, CancelToken, FranchiseError};
use mockito::{Matcher, Server};
use serde_json::json;

async fn client_for(server: &Server) -> AsyncFranchiseClient {
    AsyncFranchiseClient::builder()
        .url(server.url())
        .anon_key(common::ANON_KEY)
        .build()
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn load_browse_joins_listings_and_categories() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", common::table_path("franchises").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(common::listing_rows().to_string())
        .create_async()
        .await;
    server
        .mock("GET", common::table_path("franchise_categories").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([{ "id": 1, "name": "Automotive" }]).to_string())
        .create_async()
        .await;

    let client = client_for(&server).await;
    let page = client.load_browse().await.unwrap();
    assert_eq!(page.listings.len(), 3);
    assert_eq!(page.categories.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn load_browse_fails_when_either_fetch_fails() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", common::table_path("franchises").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    server
        .mock("GET", common::table_path("franchise_categories").as_str())
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(json!({ "message": "boom" }).to_string())
        .create_async()
        .await;

    let client = client_for(&server).await;
    let err = client.load_browse().await.unwrap_err();
    assert!(matches!(err, FranchiseError::Backend { status: 500, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn load_home_degrades_insights_independently() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", common::table_path("franchises").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(common::listing_rows().to_string())
        .create_async()
        .await;
    server
        .mock("GET", common::table_path("industry_insights").as_str())
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("oops")
        .create_async()
        .await;

    let client = client_for(&server).await;
    let home = client.load_home().await;
    assert!(home.health.ok);
    assert_eq!(home.listing_count, 3);
    assert_eq!(home.statistics.unwrap().investment_trends.avg_roi, 25);
    assert!(home.insights.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn load_home_stops_after_failed_health_check() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", common::table_path("franchises").as_str())
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body(json!({ "message": "paused" }).to_string())
        .create_async()
        .await;
    let insights = server
        .mock("GET", common::table_path("industry_insights").as_str())
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let home = client.load_home().await;
    assert!(!home.health.ok);
    assert_eq!(home.listing_count, 0);
    assert!(home.statistics.is_none());
    insights.assert_async().await;
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn cancelled_token_discards_the_load() {
    let mut server = Server::new_async().await;
    let listing = server
        .mock("GET", common::table_path("franchises").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server).await;
    let token = CancelToken::new();
    token.cancel();

    let err = client.listing_with_cancel("1", &token).await.unwrap_err();
    assert!(matches!(err, FranchiseError::Cancelled));
    assert!(matches!(
        client.load_browse_with_cancel(&token).await,
        Err(FranchiseError::Cancelled)
    ));
    listing.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn live_token_lets_the_load_finish() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", common::table_path("franchises").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([{ "id": 5, "name": "Kept" }]).to_string())
        .create_async()
        .await;

    let client = client_for(&server).await;
    let token = CancelToken::new();
    let listing = client.listing_with_cancel("5", &token).await.unwrap().unwrap();
    assert_eq!(listing.name.as_deref(), Some("Kept"));
    assert!(!token.is_cancelled());
}

#[tokio::test]
async fn cancel_wakes_waiters() {
    let token = CancelToken::new();
    let waiter = {
        let token = token.clone();
        tokio::spawn(async move { token.cancelled().await })
    };
    token.cancel();
    tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
        .await
        .unwrap()
        .unwrap();
    assert!(token.is_cancelled());
}
