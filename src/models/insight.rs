use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::de;

// ---------------------------------------------------------------------------
// IndustryInsight: editorial market insight rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInsight {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub category: Option<String>,
    /// `up`, `down` or `stable`.
    #[serde(default, deserialize_with = "de::opt_text")]
    pub trend: Option<String>,
    /// `high`, `medium` or `low`.
    #[serde(default, deserialize_with = "de::opt_text")]
    pub impact: Option<String>,
    #[serde(default, alias = "created_at", deserialize_with = "de::opt_text")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// HealthStatus: result of the explicit connectivity check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self { ok: true, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}
