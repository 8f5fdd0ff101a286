use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::de;

// ---------------------------------------------------------------------------
// Listing: one franchise opportunity as returned by the backend
// ---------------------------------------------------------------------------

/// A franchise listing in whatever shape the backend returned it.
///
/// Each business attribute may live in a flat column, an alias column, or the
/// first row of an embedded join; see [`crate::resolver`] for the precedence
/// rules. Field names serialize in camelCase and deserialize from either
/// camelCase or the snake_case column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub name: Option<String>,
    #[serde(default, alias = "brand_name", deserialize_with = "de::opt_text")]
    pub brand_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub category: Option<String>,
    #[serde(
        default,
        rename = "categoryRef",
        alias = "franchise_categories",
        deserialize_with = "de::lenient_one"
    )]
    pub category_ref: Option<CategoryRef>,

    #[serde(default, alias = "total_investment_min", deserialize_with = "de::opt_number")]
    pub total_investment_min: Option<f64>,
    #[serde(default, alias = "total_investment_max", deserialize_with = "de::opt_number")]
    pub total_investment_max: Option<f64>,
    /// Record-table spelling of `totalInvestmentMin`.
    #[serde(default, alias = "investment_min", deserialize_with = "de::opt_number")]
    pub investment_min: Option<f64>,
    #[serde(default, alias = "investment_max", deserialize_with = "de::opt_number")]
    pub investment_max: Option<f64>,
    #[serde(default, alias = "estimated_roi", deserialize_with = "de::opt_number")]
    pub estimated_roi: Option<f64>,
    #[serde(default, alias = "average_roi", deserialize_with = "de::opt_number")]
    pub average_roi: Option<f64>,
    #[serde(default, alias = "roi_percentage", deserialize_with = "de::opt_number")]
    pub roi_percentage: Option<f64>,
    #[serde(default, alias = "total_locations", deserialize_with = "de::opt_number")]
    pub total_locations: Option<f64>,
    #[serde(default, alias = "franchise_fee", deserialize_with = "de::opt_number")]
    pub franchise_fee: Option<f64>,
    #[serde(default, alias = "royalty_fee", deserialize_with = "de::opt_number")]
    pub royalty_fee: Option<f64>,
    #[serde(default, alias = "marketing_fee", deserialize_with = "de::opt_number")]
    pub marketing_fee: Option<f64>,
    #[serde(default, alias = "territory_population", deserialize_with = "de::opt_number")]
    pub territory_population: Option<f64>,
    /// Record-table spelling of `territoryPopulation`.
    #[serde(default, alias = "territory_size", deserialize_with = "de::opt_number")]
    pub territory_size: Option<f64>,
    #[serde(default, alias = "training_duration", deserialize_with = "de::opt_number")]
    pub training_duration: Option<f64>,
    #[serde(default, alias = "support_rating", deserialize_with = "de::opt_number")]
    pub support_rating: Option<f64>,

    #[serde(default, alias = "franchise_investments", deserialize_with = "de::lenient_vec")]
    pub investments: Vec<InvestmentEntry>,
    /// Location rows. Record tables store a bare pre-aggregated count here,
    /// which decodes as a single row carrying that count.
    #[serde(default, alias = "franchise_locations", deserialize_with = "de::locations")]
    pub locations: Vec<LocationEntry>,
    #[serde(default, alias = "franchise_fees", deserialize_with = "de::lenient_vec")]
    pub fees: Vec<FeeEntry>,
    #[serde(default, alias = "franchise_support", deserialize_with = "de::lenient_vec")]
    pub support: Vec<SupportEntry>,

    /// Columns the SDK does not model, kept so rows round-trip.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Listing {
    /// Decode a listing from a raw JSON row.
    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

// ---------------------------------------------------------------------------
// Embedded join rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "de::opt_text")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentEntry {
    #[serde(default, alias = "min_investment", deserialize_with = "de::opt_number")]
    pub min_investment: Option<f64>,
    #[serde(default, alias = "max_investment", deserialize_with = "de::opt_number")]
    pub max_investment: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
    #[serde(default, deserialize_with = "de::opt_number")]
    pub count: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEntry {
    #[serde(default, alias = "initial_fee", deserialize_with = "de::opt_number")]
    pub initial_fee: Option<f64>,
    #[serde(default, alias = "royalty_percentage", deserialize_with = "de::opt_number")]
    pub royalty_percentage: Option<f64>,
    #[serde(default, alias = "marketing_fee_percentage", deserialize_with = "de::opt_number")]
    pub marketing_fee_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportEntry {
    #[serde(default, alias = "territory_size", deserialize_with = "de::opt_number")]
    pub territory_size: Option<f64>,
    #[serde(default, alias = "training_weeks", deserialize_with = "de::opt_number")]
    pub training_weeks: Option<f64>,
    #[serde(default, alias = "support_score", deserialize_with = "de::opt_number")]
    pub support_score: Option<f64>,
}
