//! HTTP transport to the backend's PostgREST endpoint.
//!
//! Every request carries the project's anon key in the `apikey` header and a
//! bearer token: the user's access token for per-user tables, the anon key
//! otherwise. Non-2xx responses become [`FranchiseError::Backend`] with the
//! message from the PostgREST error body.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config;
use crate::error::{FranchiseError, Result};
use crate::models::UserSession;
use crate::rest_query::RestQuery;

/// Blocking PostgREST client bound to one project.
pub struct RestConnection {
    base_url: String,
    anon_key: String,
    client: Client,
}

impl RestConnection {
    /// Create a connection for `project_url` (e.g. `https://abc.supabase.co`).
    pub fn new(project_url: &str, anon_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: config::rest_base(project_url),
            anon_key: anon_key.to_string(),
            client,
        })
    }

    /// REST root, e.g. `https://abc.supabase.co/rest/v1`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET rows from `table` and decode each into `T`.
    pub fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &RestQuery,
        session: Option<&UserSession>,
    ) -> Result<Vec<T>> {
        let params = query.build();
        debug!(table, ?params, "GET");
        let resp = self
            .request(Method::GET, table, session)
            .query(&params)
            .send()?;
        decode(check(resp)?)
    }

    /// GET rows as raw JSON objects.
    pub fn select_values(
        &self,
        table: &str,
        query: &RestQuery,
    ) -> Result<Vec<serde_json::Value>> {
        self.select(table, query, None)
    }

    /// POST rows and return the inserted representation.
    pub fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
        session: Option<&UserSession>,
    ) -> Result<Vec<T>> {
        debug!(table, "POST");
        let resp = self
            .request(Method::POST, table, session)
            .header("Prefer", "return=representation")
            .json(body)
            .send()?;
        decode(check(resp)?)
    }

    /// DELETE rows matching the query's filters.
    pub fn delete(
        &self,
        table: &str,
        query: &RestQuery,
        session: Option<&UserSession>,
    ) -> Result<()> {
        let params = query.build();
        debug!(table, ?params, "DELETE");
        let resp = self
            .request(Method::DELETE, table, session)
            .query(&params)
            .send()?;
        check(resp)?;
        Ok(())
    }

    fn request(&self, method: Method, table: &str, session: Option<&UserSession>) -> RequestBuilder {
        let token = session
            .map(|s| s.access_token.as_str())
            .unwrap_or(self.anon_key.as_str());
        self.client
            .request(method, format!("{}/{}", self.base_url, table))
            .header("apikey", &self.anon_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(token)
    }
}

/// Map a non-success status to a backend error, keeping the server message.
fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            }
        });
    Err(FranchiseError::Backend {
        status: status.as_u16(),
        message,
    })
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<Vec<T>> {
    let body = resp.text()?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&body)?)
}
