//! Saved-listing (bookmark) queries for a signed-in user.

use serde_json::json;
use tracing::{info, warn};

use crate::config::{LIKES_TABLE, LISTINGS_TABLE, LISTING_SELECT};
use crate::connection::RestConnection;
use crate::error::{FranchiseError, Result};
use crate::models::{SavedListing, UserSession};
use crate::resolver;
use crate::rest_query::RestQuery;

// ---------------------------------------------------------------------------
// SavedQuery
// ---------------------------------------------------------------------------

/// Query interface for a user's saved listings.
///
/// Without a session, reads return empty results and writes fail with
/// [`FranchiseError::Unauthenticated`].
pub struct SavedQuery<'a> {
    conn: &'a RestConnection,
    session: Option<&'a UserSession>,
}

impl<'a> SavedQuery<'a> {
    pub fn new(conn: &'a RestConnection, session: Option<&'a UserSession>) -> Self {
        Self { conn, session }
    }

    fn session(&self) -> Result<&'a UserSession> {
        self.session.ok_or(FranchiseError::Unauthenticated)
    }

    /// Bookmark a listing for the current user.
    pub fn save(&self, franchise_id: &str) -> Result<SavedListing> {
        let session = self.session()?;
        let body = json!([{ "user_id": session.user_id, "franchise_id": franchise_id }]);
        let rows: Vec<SavedListing> = self.conn.insert(LIKES_TABLE, &body, Some(session))?;
        info!(franchise_id, "saved franchise");
        rows.into_iter()
            .next()
            .ok_or_else(|| FranchiseError::NotFound(format!("saved row for {}", franchise_id)))
    }

    /// Remove a bookmark. Removing a listing that is not saved is not an error.
    pub fn remove(&self, franchise_id: &str) -> Result<()> {
        let session = self.session()?;
        let mut qb = RestQuery::new();
        qb.eq("user_id", &session.user_id).eq("franchise_id", franchise_id);
        self.conn.delete(LIKES_TABLE, &qb, Some(session))?;
        info!(franchise_id, "removed saved franchise");
        Ok(())
    }

    /// The user's saved listings with the listing and its joins embedded,
    /// newest first.
    pub fn list(&self) -> Result<Vec<SavedListing>> {
        let Some(session) = self.session else {
            return Ok(Vec::new());
        };
        let mut qb = RestQuery::new();
        qb.select(&format!("*,{}({})", LISTINGS_TABLE, LISTING_SELECT))
            .eq("user_id", &session.user_id)
            .order("created_at", false);
        let rows: Vec<SavedListing> = self.conn.select(LIKES_TABLE, &qb, Some(session))?;
        info!(count = rows.len(), "fetched saved franchises");
        Ok(rows)
    }

    /// Whether the listing is saved. Failures read as "not saved".
    pub fn is_saved(&self, franchise_id: &str) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        let mut qb = RestQuery::new();
        qb.select("id")
            .eq("user_id", &session.user_id)
            .eq("franchise_id", franchise_id)
            .limit(1);
        match self.conn.select::<serde_json::Value>(LIKES_TABLE, &qb, Some(session)) {
            Ok(rows) => !rows.is_empty(),
            Err(e) => {
                warn!(franchise_id, error = %e, "failed to check saved state");
                false
            }
        }
    }

    /// Ids of every saved listing. Failures read as "nothing saved".
    pub fn saved_ids(&self) -> Vec<String> {
        let Some(session) = self.session else {
            return Vec::new();
        };
        let mut qb = RestQuery::new();
        qb.select("franchise_id").eq("user_id", &session.user_id);
        match self.conn.select::<SavedListing>(LIKES_TABLE, &qb, Some(session)) {
            Ok(rows) => rows.into_iter().filter_map(|r| r.franchise_id).collect(),
            Err(e) => {
                warn!(error = %e, "failed to fetch saved franchise ids");
                Vec::new()
            }
        }
    }
}

/// Average of each saved listing's investment midpoint, rounded; `0` when
/// nothing is saved. A missing bound counts as zero.
pub fn average_investment(saved: &[SavedListing]) -> i64 {
    if saved.is_empty() {
        return 0;
    }
    let total: f64 = saved
        .iter()
        .map(|item| match item.franchise.as_ref() {
            Some(listing) => {
                let min = resolver::investment_min(listing).unwrap_or(0.0);
                let max = resolver::investment_max(listing).unwrap_or(0.0);
                (min + max) / 2.0
            }
            None => 0.0,
        })
        .sum();
    (total / saved.len() as f64 + 0.5).floor() as i64
}
