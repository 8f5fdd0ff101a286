//! Franchise Insights SDK for Rust.
//!
//! Provides a typed client for a hosted PostgREST backend holding
//! franchise-investment listings, plus the in-process logic the listing views
//! share: field resolution across flat and nested record shapes, aggregate
//! statistics, comparison tables and display formatting.
//!
//! # Quick start
//!
//! ```no_run
//! use franchise_insights::{FranchiseClient, ListingFilter};
//!
//! let client = FranchiseClient::builder().from_env().build().unwrap();
//!
//! // Explicit connectivity check; nothing runs on load.
//! let health = client.health_check();
//!
//! // Query listings and aggregate them
//! let listings = client.listings().list(&ListingFilter::default()).unwrap();
//! let stats = franchise_insights::build_statistics(&listings);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod compare;
pub mod config;
pub mod connection;
pub mod display;
pub mod error;
pub mod models;
pub mod queries;
pub mod resolver;
pub mod rest_query;
pub mod stats;

#[cfg(feature = "async")]
pub use async_client::{AsyncFranchiseClient, CancelToken};
pub use compare::{Comparison, ComparisonMetric, ComparisonRow};
pub use connection::RestConnection;
pub use error::{FranchiseError, Result};
pub use models::{HealthStatus, Listing, UserSession};
pub use queries::ListingFilter;
pub use resolver::{Attribute, NormalizedListing};
pub use rest_query::RestQuery;
pub use stats::{build_statistics, ListingStatistics};

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

// ---------------------------------------------------------------------------
// FranchiseClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`FranchiseClient`].
///
/// Use [`FranchiseClient::builder()`] to obtain a builder, chain
/// configuration methods, and call [`build()`](FranchiseClientBuilder::build).
#[derive(Debug, Clone)]
pub struct FranchiseClientBuilder {
    url: Option<String>,
    anon_key: Option<String>,
    timeout: Duration,
}

impl Default for FranchiseClientBuilder {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl FranchiseClientBuilder {
    /// Set the project URL, e.g. `https://abc.supabase.co`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the project's public (anon) API key.
    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fill unset credentials from the environment.
    ///
    /// Loads a `.env` file from the working directory if present, then reads
    /// `SUPABASE_URL` / `SUPABASE_ANON_KEY`, falling back to the
    /// `VITE_`-prefixed names. Values already set on the builder win.
    pub fn from_env(mut self) -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!(error = %e, "failed to load .env file");
            }
        }
        if self.url.is_none() {
            self.url = config::env_first(&[config::ENV_URL, config::ENV_URL_LEGACY]);
        }
        if self.anon_key.is_none() {
            self.anon_key = config::env_first(&[config::ENV_ANON_KEY, config::ENV_ANON_KEY_LEGACY]);
        }
        self
    }

    /// Validate the configuration and build the client.
    ///
    /// Does not contact the backend; call
    /// [`FranchiseClient::health_check`] for that.
    pub fn build(self) -> Result<FranchiseClient> {
        let url = self
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| FranchiseError::Config("missing backend URL".to_string()))?;
        let anon_key = self
            .anon_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| FranchiseError::Config("missing anon key".to_string()))?;

        if url.trim_end_matches('/') == config::PLACEHOLDER_URL || anon_key == config::PLACEHOLDER_ANON_KEY {
            return Err(FranchiseError::Config(
                "placeholder credentials; update your backend URL and anon key".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FranchiseError::Config(format!("invalid backend URL: {}", url)));
        }

        let conn = RestConnection::new(&url, &anon_key, self.timeout)?;
        Ok(FranchiseClient { conn })
    }
}

// ---------------------------------------------------------------------------
// FranchiseClient
// ---------------------------------------------------------------------------

/// The main entry point for the SDK.
///
/// Wraps a [`RestConnection`] and exposes domain-specific query interfaces as
/// lightweight borrowing wrappers.
pub struct FranchiseClient {
    conn: RestConnection,
}

impl FranchiseClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> FranchiseClientBuilder {
        FranchiseClientBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the listing query interface.
    pub fn listings(&self) -> queries::ListingQuery<'_> {
        queries::ListingQuery::new(&self.conn)
    }

    /// Access the category query interface.
    pub fn categories(&self) -> queries::CategoryQuery<'_> {
        queries::CategoryQuery::new(&self.conn)
    }

    /// Access the industry insight query interface.
    pub fn insights(&self) -> queries::InsightQuery<'_> {
        queries::InsightQuery::new(&self.conn)
    }

    /// Access the saved-listing interface for `session`.
    ///
    /// With `None`, reads come back empty and writes fail with
    /// [`FranchiseError::Unauthenticated`].
    pub fn saved<'a>(&'a self, session: Option<&'a UserSession>) -> queries::SavedQuery<'a> {
        queries::SavedQuery::new(&self.conn, session)
    }

    /// Access the collection interface for `session`.
    pub fn collections<'a>(
        &'a self,
        session: Option<&'a UserSession>,
    ) -> queries::CollectionQuery<'a> {
        queries::CollectionQuery::new(&self.conn, session)
    }

    /// Access the Ask-AI question interface.
    pub fn questions(&self) -> queries::QuestionQuery<'_> {
        queries::QuestionQuery::new(&self.conn)
    }

    // -- Utility methods ---------------------------------------------------

    /// Check that the backend answers a minimal listing query.
    ///
    /// Never fails; the error text is carried in the returned status.
    pub fn health_check(&self) -> HealthStatus {
        let mut qb = RestQuery::new();
        qb.select("id").limit(1);
        match self.conn.select_values(config::LISTINGS_TABLE, &qb) {
            Ok(_) => {
                info!(url = self.conn.base_url(), "backend connection successful");
                HealthStatus::healthy()
            }
            Err(e) => {
                warn!(error = %e, "backend connection failed");
                HealthStatus::failed(e.to_string())
            }
        }
    }

    /// Run a raw query against any table.
    ///
    /// Escape hatch for tables the typed interfaces do not cover.
    pub fn rows(&self, table: &str, query: &RestQuery) -> Result<Vec<serde_json::Value>> {
        self.conn.select_values(table, query)
    }

    /// Return a reference to the underlying [`RestConnection`].
    pub fn connection(&self) -> &RestConnection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for FranchiseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FranchiseClient(url={}, schema=v{})",
            self.conn.base_url(),
            config::LISTING_SCHEMA_VERSION
        )
    }
}
