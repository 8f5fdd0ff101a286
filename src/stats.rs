//! Aggregate statistics over a set of listings.
//!
//! Everything here is a pure function of its input slice: no errors, no
//! caching. Recompute whenever the listing set changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Listing;
use crate::resolver::{self, Attribute};

// ---------------------------------------------------------------------------
// ListingStatistics
// ---------------------------------------------------------------------------

/// Category distribution and averaged metrics for a set of listings.
///
/// Averages are rounded to the nearest integer. An overall average with no
/// contributing listings is reported as `0`; the matching `*_samples` count
/// tells a presenter whether that zero is real. Categories without any ROI
/// value are left out of `roi_by_category`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStatistics {
    pub total_listings: usize,
    pub category_distribution: BTreeMap<String, usize>,
    pub investment_trends: InvestmentTrends,
    pub roi_by_category: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTrends {
    pub avg_min_investment: i64,
    pub avg_max_investment: i64,
    pub avg_roi: i64,
    pub min_investment_samples: usize,
    pub max_investment_samples: usize,
    pub roi_samples: usize,
}

/// One slice of the category distribution, for charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub count: usize,
    /// Share of all listings, 0-100.
    pub percent: f64,
}

impl ListingStatistics {
    /// Distribution slices ordered by count (descending), then name.
    pub fn category_shares(&self) -> Vec<CategoryShare> {
        let total = self.total_listings.max(1) as f64;
        let mut shares: Vec<CategoryShare> = self
            .category_distribution
            .iter()
            .map(|(name, &count)| CategoryShare {
                name: name.clone(),
                count,
                percent: count as f64 * 100.0 / total,
            })
            .collect();
        shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        shares
    }

    pub fn is_empty(&self) -> bool {
        self.total_listings == 0
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Running sum/count that skips unavailable values.
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn rounded(&self) -> Option<i64> {
        if self.count == 0 {
            None
        } else {
            Some(round_half_up(self.sum / self.count as f64))
        }
    }
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Build the full statistics snapshot in one pass over `listings`.
pub fn build_statistics(listings: &[Listing]) -> ListingStatistics {
    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut roi_means: BTreeMap<String, Mean> = BTreeMap::new();
    let mut min_mean = Mean::default();
    let mut max_mean = Mean::default();
    let mut roi_mean = Mean::default();

    for listing in listings {
        let category = resolver::category_or_default(listing);
        *distribution.entry(category.to_string()).or_default() += 1;

        let roi = resolver::roi(listing);
        min_mean.push(resolver::investment_min(listing));
        max_mean.push(resolver::investment_max(listing));
        roi_mean.push(roi);

        if roi.is_some() {
            roi_means.entry(category.to_string()).or_default().push(roi);
        }
    }

    let roi_by_category = roi_means
        .into_iter()
        .filter_map(|(category, mean)| mean.rounded().map(|avg| (category, avg)))
        .collect();

    ListingStatistics {
        total_listings: listings.len(),
        category_distribution: distribution,
        investment_trends: InvestmentTrends {
            avg_min_investment: min_mean.rounded().unwrap_or(0),
            avg_max_investment: max_mean.rounded().unwrap_or(0),
            avg_roi: roi_mean.rounded().unwrap_or(0),
            min_investment_samples: min_mean.count,
            max_investment_samples: max_mean.count,
            roi_samples: roi_mean.count,
        },
        roi_by_category,
    }
}

/// Count of listings per category, missing categories counted as `"Other"`.
pub fn category_distribution(listings: &[Listing]) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    for listing in listings {
        *distribution
            .entry(resolver::category_or_default(listing).to_string())
            .or_default() += 1;
    }
    distribution
}

/// Rounded average of `attr` over listings where it is available, or `None`
/// when no listing has it.
pub fn average(listings: &[Listing], attr: Attribute) -> Option<i64> {
    let mut mean = Mean::default();
    for listing in listings {
        mean.push(resolver::resolve(listing, attr));
    }
    mean.rounded()
}

/// Average ROI per category, omitting categories with no ROI values.
pub fn roi_by_category(listings: &[Listing]) -> BTreeMap<String, i64> {
    build_statistics(listings).roi_by_category
}
