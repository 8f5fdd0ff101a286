//! Shared test fixtures for the franchise SDK integration tests.
//!
//! Provides listing rows in the backend's snake_case wire shape and helpers
//! to point a client at a `mockito` server.

#![allow(dead_code)]

use franchise_insights::{FranchiseClient, Listing};
use serde_json::{json, Value};
use std::time::Duration;

pub const ANON_KEY: &str = "test-anon-key";

/// Build a blocking client against the mock server's URL.
pub fn client_for(server: &mockito::Server) -> FranchiseClient {
    FranchiseClient::builder()
        .url(server.url())
        .anon_key(ANON_KEY)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Path of a table under the REST mount point.
pub fn table_path(table: &str) -> String {
    format!("/rest/v1/{}", table)
}

/// Rows as the listing table returns them, with embedded joins.
pub fn listing_rows() -> Value {
    json!([
        {
            "id": 1,
            "name": "Burger Barn",
            "category": "Food & Beverage",
            "description": "Classic burgers",
            "total_investment_min": 100000,
            "total_investment_max": 200000,
            "estimated_roi": 20,
            "total_locations": 450,
            "franchise_investments": [],
            "franchise_locations": [],
            "franchise_fees": [{ "initial_fee": 35000, "royalty_percentage": 6 }],
            "franchise_support": []
        },
        {
            "id": 2,
            "name": "Pizza Planet",
            "franchise_categories": { "name": "Food & Beverage" },
            "franchise_investments": [{ "min_investment": 150000, "max_investment": 250000 }],
            "average_roi": 30,
            "franchise_locations": [{ "count": 10 }, { "count": 5 }],
            "franchise_fees": [],
            "franchise_support": [{ "territory_size": 50000, "training_weeks": 4, "support_score": 4.5 }]
        },
        {
            "id": "c3",
            "brand_name": "Fix-It Auto",
            "category": "Automotive",
            "total_investment_min": "50000",
            "total_investment_max": "100000",
            "estimated_roi": null
        }
    ])
}

pub fn listings() -> Vec<Listing> {
    serde_json::from_value(listing_rows()).unwrap()
}

/// Listing built from the logical (camelCase) field names.
pub fn listing(value: Value) -> Listing {
    Listing::from_value(value).unwrap()
}
