//! Field resolution for listings.
//!
//! A listing attribute may be stored in a flat column, in an alias column, or
//! in an embedded join collection. This module is the only place that knows
//! the precedence; every consumer (cards, profile, comparison, statistics)
//! reads attributes through it.
//!
//! Resolution order, first present value wins:
//!
//! 1. the flat column
//! 2. the alias columns, in order, when the attribute has any
//! 3. the nested join collection (first row, or the sum of all rows for
//!    location counts)
//! 4. `None`, the "unavailable" sentinel
//!
//! `None` is never the same as zero. A flat `0` is a present value.
//!
//! | Attribute | Flat | Alias | Nested |
//! |---|---|---|---|
//! | name | `name` | `brandName` | |
//! | category | `category` | | `franchise_categories.name` |
//! | investmentMin | `totalInvestmentMin` | `investmentMin` | `investments[0].minInvestment` |
//! | investmentMax | `totalInvestmentMax` | `investmentMax` | `investments[0].maxInvestment` |
//! | roi | `estimatedRoi` | `averageRoi`, `roiPercentage` | |
//! | locationCount | `totalLocations` | | sum of `locations[*].count` |
//! | franchiseFee | `franchiseFee` | | `fees[0].initialFee` |
//! | royaltyFee | `royaltyFee` | | `fees[0].royaltyPercentage` |
//! | marketingFee | `marketingFee` | | `fees[0].marketingFeePercentage` |
//! | territorySize | `territoryPopulation` | `territorySize` | `support[0].territorySize` |
//! | trainingWeeks | `trainingDuration` | | `support[0].trainingWeeks` |
//! | supportRating | `supportRating` | | `support[0].supportScore` |
//!
//! A bare number in `locations` (record tables) decodes as a single location
//! row, so it resolves through the nested sum.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DEFAULT_CATEGORY;
use crate::models::Listing;

// ---------------------------------------------------------------------------
// Attribute
// ---------------------------------------------------------------------------

/// Numeric business attributes that can be resolved from a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    InvestmentMin,
    InvestmentMax,
    Roi,
    LocationCount,
    FranchiseFee,
    RoyaltyFee,
    MarketingFee,
    TerritorySize,
    TrainingWeeks,
    SupportRating,
}

/// Where an attribute may be stored, using the camelCase field names.
///
/// `nested` is `(collection, field)`; the resolver reads the first row, or
/// sums every row for location counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSources {
    pub flat: &'static str,
    pub aliases: &'static [&'static str],
    pub nested: Option<(&'static str, &'static str)>,
}

impl Attribute {
    pub const ALL: [Attribute; 10] = [
        Attribute::InvestmentMin,
        Attribute::InvestmentMax,
        Attribute::Roi,
        Attribute::LocationCount,
        Attribute::FranchiseFee,
        Attribute::RoyaltyFee,
        Attribute::MarketingFee,
        Attribute::TerritorySize,
        Attribute::TrainingWeeks,
        Attribute::SupportRating,
    ];

    /// Logical attribute name.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::InvestmentMin => "investmentMin",
            Attribute::InvestmentMax => "investmentMax",
            Attribute::Roi => "roi",
            Attribute::LocationCount => "locationCount",
            Attribute::FranchiseFee => "franchiseFee",
            Attribute::RoyaltyFee => "royaltyFee",
            Attribute::MarketingFee => "marketingFee",
            Attribute::TerritorySize => "territorySize",
            Attribute::TrainingWeeks => "trainingWeeks",
            Attribute::SupportRating => "supportRating",
        }
    }

    pub fn sources(self) -> FieldSources {
        match self {
            Attribute::InvestmentMin => field_sources("totalInvestmentMin", &["investmentMin"], Some(("investments", "minInvestment"))),
            Attribute::InvestmentMax => field_sources("totalInvestmentMax", &["investmentMax"], Some(("investments", "maxInvestment"))),
            Attribute::Roi => field_sources("estimatedRoi", &["averageRoi", "roiPercentage"], None),
            Attribute::LocationCount => field_sources("totalLocations", &[], Some(("locations", "count"))),
            Attribute::FranchiseFee => field_sources("franchiseFee", &[], Some(("fees", "initialFee"))),
            Attribute::RoyaltyFee => field_sources("royaltyFee", &[], Some(("fees", "royaltyPercentage"))),
            Attribute::MarketingFee => field_sources("marketingFee", &[], Some(("fees", "marketingFeePercentage"))),
            Attribute::TerritorySize => field_sources("territoryPopulation", &["territorySize"], Some(("support", "territorySize"))),
            Attribute::TrainingWeeks => field_sources("trainingDuration", &[], Some(("support", "trainingWeeks"))),
            Attribute::SupportRating => field_sources("supportRating", &[], Some(("support", "supportScore"))),
        }
    }
}

const fn field_sources(
    flat: &'static str,
    aliases: &'static [&'static str],
    nested: Option<(&'static str, &'static str)>,
) -> FieldSources {
    FieldSources { flat, aliases, nested }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Per-attribute resolvers
// ---------------------------------------------------------------------------

/// Resolve a numeric attribute. `None` means unavailable.
pub fn resolve(listing: &Listing, attr: Attribute) -> Option<f64> {
    match attr {
        Attribute::InvestmentMin => investment_min(listing),
        Attribute::InvestmentMax => investment_max(listing),
        Attribute::Roi => roi(listing),
        Attribute::LocationCount => location_count(listing),
        Attribute::FranchiseFee => franchise_fee(listing),
        Attribute::RoyaltyFee => royalty_fee(listing),
        Attribute::MarketingFee => marketing_fee(listing),
        Attribute::TerritorySize => territory_size(listing),
        Attribute::TrainingWeeks => training_weeks(listing),
        Attribute::SupportRating => support_rating(listing),
    }
}

pub fn name(listing: &Listing) -> Option<&str> {
    listing.name.as_deref().or(listing.brand_name.as_deref())
}

pub fn category(listing: &Listing) -> Option<&str> {
    listing
        .category
        .as_deref()
        .or_else(|| listing.category_ref.as_ref().and_then(|c| c.name.as_deref()))
}

/// Category used for partitioning; listings without one fall under `"Other"`.
pub fn category_or_default(listing: &Listing) -> &str {
    category(listing).unwrap_or(DEFAULT_CATEGORY)
}

pub fn investment_min(listing: &Listing) -> Option<f64> {
    listing
        .total_investment_min
        .or(listing.investment_min)
        .or_else(|| listing.investments.first().and_then(|i| i.min_investment))
}

pub fn investment_max(listing: &Listing) -> Option<f64> {
    listing
        .total_investment_max
        .or(listing.investment_max)
        .or_else(|| listing.investments.first().and_then(|i| i.max_investment))
}

pub fn roi(listing: &Listing) -> Option<f64> {
    listing
        .estimated_roi
        .or(listing.average_roi)
        .or(listing.roi_percentage)
}

/// Unlike the other attributes, the nested fallback sums every location row.
/// Rows without a count contribute zero; an empty collection is unavailable.
pub fn location_count(listing: &Listing) -> Option<f64> {
    listing.total_locations.or_else(|| {
        if listing.locations.is_empty() {
            None
        } else {
            Some(listing.locations.iter().filter_map(|l| l.count).sum())
        }
    })
}

pub fn franchise_fee(listing: &Listing) -> Option<f64> {
    listing
        .franchise_fee
        .or_else(|| listing.fees.first().and_then(|f| f.initial_fee))
}

pub fn royalty_fee(listing: &Listing) -> Option<f64> {
    listing
        .royalty_fee
        .or_else(|| listing.fees.first().and_then(|f| f.royalty_percentage))
}

pub fn marketing_fee(listing: &Listing) -> Option<f64> {
    listing
        .marketing_fee
        .or_else(|| listing.fees.first().and_then(|f| f.marketing_fee_percentage))
}

pub fn territory_size(listing: &Listing) -> Option<f64> {
    listing
        .territory_population
        .or(listing.territory_size)
        .or_else(|| listing.support.first().and_then(|s| s.territory_size))
}

pub fn training_weeks(listing: &Listing) -> Option<f64> {
    listing
        .training_duration
        .or_else(|| listing.support.first().and_then(|s| s.training_weeks))
}

pub fn support_rating(listing: &Listing) -> Option<f64> {
    listing
        .support_rating
        .or_else(|| listing.support.first().and_then(|s| s.support_score))
}

// ---------------------------------------------------------------------------
// NormalizedListing
// ---------------------------------------------------------------------------

/// A listing with every attribute resolved once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedListing {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: String,
    pub investment_min: Option<f64>,
    pub investment_max: Option<f64>,
    pub roi: Option<f64>,
    pub location_count: Option<f64>,
    pub franchise_fee: Option<f64>,
    pub royalty_fee: Option<f64>,
    pub marketing_fee: Option<f64>,
    pub territory_size: Option<f64>,
    pub training_weeks: Option<f64>,
    pub support_rating: Option<f64>,
}

impl NormalizedListing {
    pub fn get(&self, attr: Attribute) -> Option<f64> {
        match attr {
            Attribute::InvestmentMin => self.investment_min,
            Attribute::InvestmentMax => self.investment_max,
            Attribute::Roi => self.roi,
            Attribute::LocationCount => self.location_count,
            Attribute::FranchiseFee => self.franchise_fee,
            Attribute::RoyaltyFee => self.royalty_fee,
            Attribute::MarketingFee => self.marketing_fee,
            Attribute::TerritorySize => self.territory_size,
            Attribute::TrainingWeeks => self.training_weeks,
            Attribute::SupportRating => self.support_rating,
        }
    }
}

impl From<&Listing> for NormalizedListing {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            name: name(listing).map(str::to_string),
            category: category_or_default(listing).to_string(),
            investment_min: investment_min(listing),
            investment_max: investment_max(listing),
            roi: roi(listing),
            location_count: location_count(listing),
            franchise_fee: franchise_fee(listing),
            royalty_fee: royalty_fee(listing),
            marketing_fee: marketing_fee(listing),
            territory_size: territory_size(listing),
            training_weeks: training_weeks(listing),
            support_rating: support_rating(listing),
        }
    }
}

pub fn normalize(listing: &Listing) -> NormalizedListing {
    NormalizedListing::from(listing)
}
