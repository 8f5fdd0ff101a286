use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::de;

/// A listing category row from the categories table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Category {
    /// Lowercased name, the key the browse filter compares against.
    pub fn key(&self) -> Option<String> {
        self.name.as_deref().map(str::to_lowercase)
    }
}
