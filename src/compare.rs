//! Side-by-side comparison of up to three listings.

use serde::{Deserialize, Serialize};

use crate::config::COMPARE_LIMIT;
use crate::display::{format_currency, format_number, NOT_AVAILABLE};
use crate::models::Listing;
use crate::resolver::{self, Attribute};

// ---------------------------------------------------------------------------
// ComparisonMetric
// ---------------------------------------------------------------------------

/// Rows of the comparison table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMetric {
    MinInvestment,
    MaxInvestment,
    FranchiseFee,
    Roi,
    RoyaltyFee,
    MarketingFee,
    Locations,
    TerritorySize,
    TrainingDuration,
    SupportRating,
}

impl ComparisonMetric {
    pub const ALL: [ComparisonMetric; 10] = [
        ComparisonMetric::MinInvestment,
        ComparisonMetric::MaxInvestment,
        ComparisonMetric::FranchiseFee,
        ComparisonMetric::Roi,
        ComparisonMetric::RoyaltyFee,
        ComparisonMetric::MarketingFee,
        ComparisonMetric::Locations,
        ComparisonMetric::TerritorySize,
        ComparisonMetric::TrainingDuration,
        ComparisonMetric::SupportRating,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComparisonMetric::MinInvestment => "Min Investment",
            ComparisonMetric::MaxInvestment => "Max Investment",
            ComparisonMetric::FranchiseFee => "Franchise Fee",
            ComparisonMetric::Roi => "ROI",
            ComparisonMetric::RoyaltyFee => "Royalty Fee",
            ComparisonMetric::MarketingFee => "Marketing Fee",
            ComparisonMetric::Locations => "Total Locations",
            ComparisonMetric::TerritorySize => "Territory Size",
            ComparisonMetric::TrainingDuration => "Training Duration",
            ComparisonMetric::SupportRating => "Support Rating",
        }
    }

    pub fn attribute(self) -> Attribute {
        match self {
            ComparisonMetric::MinInvestment => Attribute::InvestmentMin,
            ComparisonMetric::MaxInvestment => Attribute::InvestmentMax,
            ComparisonMetric::FranchiseFee => Attribute::FranchiseFee,
            ComparisonMetric::Roi => Attribute::Roi,
            ComparisonMetric::RoyaltyFee => Attribute::RoyaltyFee,
            ComparisonMetric::MarketingFee => Attribute::MarketingFee,
            ComparisonMetric::Locations => Attribute::LocationCount,
            ComparisonMetric::TerritorySize => Attribute::TerritorySize,
            ComparisonMetric::TrainingDuration => Attribute::TrainingWeeks,
            ComparisonMetric::SupportRating => Attribute::SupportRating,
        }
    }

    /// Format one cell; unavailable values read "N/A".
    pub fn format(self, value: Option<f64>) -> String {
        let Some(v) = value else {
            return NOT_AVAILABLE.to_string();
        };
        match self {
            ComparisonMetric::MinInvestment
            | ComparisonMetric::MaxInvestment
            | ComparisonMetric::FranchiseFee => format_currency(v),
            ComparisonMetric::Roi | ComparisonMetric::RoyaltyFee | ComparisonMetric::MarketingFee => {
                format!("{}%", format_number(v))
            }
            ComparisonMetric::Locations => format_number(v),
            ComparisonMetric::TerritorySize => format!("{} pop.", format_number(v)),
            ComparisonMetric::TrainingDuration => format!("{} weeks", format_number(v)),
            ComparisonMetric::SupportRating => format!("{}/5", format_number(v)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: ComparisonMetric,
    pub label: String,
    pub values: Vec<String>,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// The current comparison selection.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    selected: Vec<Listing>,
}

impl Comparison {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the listing, or remove it when already selected (matched by id).
    ///
    /// Returns `true` if the selection changed; adding to a full selection
    /// is a no-op.
    pub fn toggle(&mut self, listing: &Listing) -> bool {
        if let Some(pos) = self.position(listing) {
            self.selected.remove(pos);
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.selected.push(listing.clone());
        true
    }

    pub fn contains(&self, listing: &Listing) -> bool {
        self.position(listing).is_some()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= COMPARE_LIMIT
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected(&self) -> &[Listing] {
        &self.selected
    }

    /// One row per metric, one value per selected listing in selection order.
    pub fn rows(&self) -> Vec<ComparisonRow> {
        ComparisonMetric::ALL
            .iter()
            .map(|&metric| ComparisonRow {
                metric,
                label: metric.label().to_string(),
                values: self
                    .selected
                    .iter()
                    .map(|l| metric.format(resolver::resolve(l, metric.attribute())))
                    .collect(),
            })
            .collect()
    }

    fn position(&self, listing: &Listing) -> Option<usize> {
        let id = listing.id.as_deref()?;
        self.selected.iter().position(|l| l.id.as_deref() == Some(id))
    }
}
