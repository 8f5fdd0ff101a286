//! Client construction, health checks and saved listings.

mod common;

use franchise_insights::queries::saved::average_investment;
use franchise_insights::{FranchiseClient, FranchiseError, UserSession};
use mockito::Matcher;
use serde_json::json;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn build_requires_url_and_key() {
    let err = FranchiseClient::builder().anon_key("k").build().err().unwrap();
    assert!(matches!(err, FranchiseError::Config(_)));

    let err = FranchiseClient::builder()
        .url("https://abc.supabase.co")
        .anon_key("   ")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, FranchiseError::Config(_)));
}

#[test]
fn build_rejects_placeholder_credentials() {
    let err = FranchiseClient::builder()
        .url("https://your-project.supabase.co/")
        .anon_key("real-key")
        .build()
        .err()
        .unwrap();
    assert!(err.to_string().contains("placeholder"));

    let err = FranchiseClient::builder()
        .url("https://abc.supabase.co")
        .anon_key("your-anon-key")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, FranchiseError::Config(_)));
}

#[test]
fn build_rejects_non_http_url() {
    let err = FranchiseClient::builder()
        .url("abc.supabase.co")
        .anon_key("k")
        .build()
        .err()
        .unwrap();
    assert!(err.to_string().contains("invalid backend URL"));
}

#[test]
fn explicit_values_win_over_environment() {
    let client = FranchiseClient::builder()
        .url("https://abc.supabase.co/")
        .anon_key("explicit")
        .from_env()
        .build()
        .unwrap();
    assert_eq!(client.connection().base_url(), "https://abc.supabase.co/rest/v1");
    assert_eq!(
        client.to_string(),
        "FranchiseClient(url=https://abc.supabase.co/rest/v1, schema=v1)"
    );
}

// ---------------------------------------------------------------------------
// health_check
// ---------------------------------------------------------------------------

#[test]
fn health_check_ok() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", common::table_path("franchises").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "id".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create();

    let client = common::client_for(&server);
    let health = client.health_check();
    mock.assert();
    assert!(health.ok);
    assert!(health.error.is_none());
}

#[test]
fn health_check_carries_error_text() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", common::table_path("franchises").as_str())
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body(json!({ "message": "Service unavailable" }).to_string())
        .create();

    let client = common::client_for(&server);
    let health = client.health_check();
    assert!(!health.ok);
    assert!(health.error.unwrap().contains("Service unavailable"));
}

#[test]
fn rows_runs_raw_queries() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", common::table_path("brands").as_str())
        .match_query(Matcher::UrlEncoded("select".into(), "name".into()))
        .with_status(200)
        .with_body(json!([{ "name": "Acme" }]).to_string())
        .create();

    let client = common::client_for(&server);
    let mut qb = franchise_insights::RestQuery::new();
    qb.select("name");
    let rows = client.rows("brands", &qb).unwrap();
    assert_eq!(rows[0]["name"], "Acme");
}

// ---------------------------------------------------------------------------
// Saved listings
// ---------------------------------------------------------------------------

fn session() -> UserSession {
    UserSession::new("user-1", "user-token")
}

#[test]
fn saving_without_session_is_unauthenticated() {
    let server = mockito::Server::new();
    let client = common::client_for(&server);
    let saved = client.saved(None);

    assert!(matches!(saved.save("1"), Err(FranchiseError::Unauthenticated)));
    assert!(matches!(saved.remove("1"), Err(FranchiseError::Unauthenticated)));
    assert!(saved.list().unwrap().is_empty());
    assert!(!saved.is_saved("1"));
    assert!(saved.saved_ids().is_empty());
}

#[test]
fn save_posts_with_user_token() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", common::table_path("user_likes").as_str())
        .match_query(Matcher::Any)
        .match_header("apikey", common::ANON_KEY)
        .match_header("authorization", "Bearer user-token")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::Json(json!([{ "user_id": "user-1", "franchise_id": "2" }])))
        .with_status(201)
        .with_body(json!([{ "id": 10, "user_id": "user-1", "franchise_id": 2 }]).to_string())
        .create();

    let client = common::client_for(&server);
    let session = session();
    let row = client.saved(Some(&session)).save("2").unwrap();

    mock.assert();
    assert_eq!(row.id.as_deref(), Some("10"));
    assert_eq!(row.franchise_id.as_deref(), Some("2"));
}

#[test]
fn remove_deletes_by_user_and_listing() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", common::table_path("user_likes").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()),
            Matcher::UrlEncoded("franchise_id".into(), "eq.2".into()),
        ]))
        .match_header("authorization", "Bearer user-token")
        .with_status(204)
        .create();

    let client = common::client_for(&server);
    let session = session();
    client.saved(Some(&session)).remove("2").unwrap();
    mock.assert();
}

#[test]
fn saved_list_embeds_listings_and_averages_investment() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", common::table_path("user_likes").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()),
            Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
        ]))
        .with_status(200)
        .with_body(
            json!([
                {
                    "id": 1, "user_id": "user-1", "franchise_id": 1,
                    "franchises": { "id": 1, "name": "A", "total_investment_min": 100000, "total_investment_max": 200000 }
                },
                {
                    "id": 2, "user_id": "user-1", "franchise_id": 2,
                    "franchises": {
                        "id": 2, "name": "B",
                        "franchise_investments": [{ "min_investment": 50000 }]
                    }
                }
            ])
            .to_string(),
        )
        .create();

    let client = common::client_for(&server);
    let session = session();
    let saved = client.saved(Some(&session)).list().unwrap();

    assert_eq!(saved.len(), 2);
    // Midpoints 150000 and 25000 (missing max counts as zero).
    assert_eq!(average_investment(&saved), 87_500);
}

#[test]
fn saved_state_degrades_on_backend_errors() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", common::table_path("user_likes").as_str())
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(json!({ "message": "boom" }).to_string())
        .create();

    let client = common::client_for(&server);
    let session = session();
    let saved = client.saved(Some(&session));
    assert!(!saved.is_saved("1"));
    assert!(saved.saved_ids().is_empty());
    assert!(saved.list().is_err());
}

#[test]
fn saved_ids_collects_listing_ids() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", common::table_path("user_likes").as_str())
        .match_query(Matcher::UrlEncoded("select".into(), "franchise_id".into()))
        .with_status(200)
        .with_body(json!([{ "franchise_id": 3 }, { "franchise_id": "7" }]).to_string())
        .create();

    let client = common::client_for(&server);
    let session = session();
    assert_eq!(client.saved(Some(&session)).saved_ids(), ["3", "7"]);
}
