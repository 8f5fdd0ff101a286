use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::de;

/// A curated question and answer shown on the Ask AI page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiQuestion {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub category: Option<String>,
    #[serde(default, alias = "created_at", deserialize_with = "de::opt_text")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}
