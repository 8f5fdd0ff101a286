//! Collection queries for a signed-in user.

use serde_json::json;
use tracing::{info, warn};

use crate::config::{COLLECTIONS_TABLE, LISTINGS_TABLE, LISTING_SELECT};
use crate::connection::RestConnection;
use crate::error::{FranchiseError, Result};
use crate::models::{CollectionItem, UserSession};
use crate::rest_query::RestQuery;

/// Query interface for a user's collection.
///
/// Reads degrade to empty without a session or on failure; writes need a
/// session and propagate backend errors.
pub struct CollectionQuery<'a> {
    conn: &'a RestConnection,
    session: Option<&'a UserSession>,
}

impl<'a> CollectionQuery<'a> {
    pub fn new(conn: &'a RestConnection, session: Option<&'a UserSession>) -> Self {
        Self { conn, session }
    }

    fn session(&self) -> Result<&'a UserSession> {
        self.session.ok_or(FranchiseError::Unauthenticated)
    }

    /// Every collection row for the user with the listing embedded.
    pub fn list(&self) -> Vec<CollectionItem> {
        let Some(session) = self.session else {
            return Vec::new();
        };
        let mut qb = RestQuery::new();
        qb.select(&format!("*,{}({})", LISTINGS_TABLE, LISTING_SELECT))
            .eq("user_id", &session.user_id);
        match self.conn.select::<CollectionItem>(COLLECTIONS_TABLE, &qb, Some(session)) {
            Ok(rows) => {
                info!(count = rows.len(), "fetched collection");
                rows
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch collection");
                Vec::new()
            }
        }
    }

    /// Add a listing to the collection. Returns the inserted rows.
    pub fn add(&self, franchise_id: &str) -> Result<Vec<CollectionItem>> {
        let session = self.session()?;
        let body = json!([{ "user_id": session.user_id, "franchise_id": franchise_id }]);
        let rows = self.conn.insert(COLLECTIONS_TABLE, &body, Some(session))?;
        info!(franchise_id, "added franchise to collection");
        Ok(rows)
    }

    /// Remove a listing from the collection.
    pub fn remove(&self, franchise_id: &str) -> Result<()> {
        let session = self.session()?;
        let mut qb = RestQuery::new();
        qb.eq("user_id", &session.user_id).eq("franchise_id", franchise_id);
        self.conn.delete(COLLECTIONS_TABLE, &qb, Some(session))?;
        info!(franchise_id, "removed franchise from collection");
        Ok(())
    }
}
