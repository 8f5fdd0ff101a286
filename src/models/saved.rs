use serde::{Deserialize, Serialize};
use std::fmt;

use super::de;
use super::listing::Listing;

// ---------------------------------------------------------------------------
// SavedListing: a user's bookmark row with its embedded listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedListing {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(default, alias = "user_id", deserialize_with = "de::opt_id")]
    pub user_id: Option<String>,
    #[serde(default, alias = "franchise_id", deserialize_with = "de::opt_id")]
    pub franchise_id: Option<String>,
    #[serde(default, alias = "created_at", deserialize_with = "de::opt_text")]
    pub created_at: Option<String>,
    #[serde(default, alias = "franchises")]
    pub franchise: Option<Listing>,
}

/// Row of a user's collection; same columns as a bookmark.
pub type CollectionItem = SavedListing;

// ---------------------------------------------------------------------------
// UserSession: credentials handed over by the auth provider
// ---------------------------------------------------------------------------

/// An authenticated user as issued by the auth provider.
///
/// The SDK never signs users in or refreshes tokens; callers obtain the
/// session elsewhere and pass it to [`crate::queries::SavedQuery`].
#[derive(Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: String,
    pub access_token: String,
}

impl UserSession {
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for UserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSession")
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
