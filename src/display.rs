//! Display strings for resolved listing metrics.
//!
//! Fallback wording follows the listing pages: investment and fee details
//! read "Contact for details" when unknown, headline numbers read "N/A".

use crate::models::Listing;
use crate::resolver;

pub const NOT_AVAILABLE: &str = "N/A";
pub const CONTACT_FOR_DETAILS: &str = "Contact for details";
pub const TERRITORY_VARIES: &str = "Varies";

/// Format a number with `,` thousands separators and at most three
/// fractional digits, e.g. `1234567.5` -> `"1,234,567.5"`.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let frac = format!("{:.3}", abs - abs.trunc());
    let frac = frac.trim_start_matches('0').trim_end_matches('0').trim_end_matches('.');

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && (whole > 0 || !frac.is_empty()) { "-" } else { "" };
    format!("{sign}{grouped}{frac}")
}

pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value))
}

/// `"$min - $max"` from the resolved bounds. A missing bound shows as `$0`;
/// with neither bound known the range reads "Contact for details".
pub fn investment_range(listing: &Listing) -> String {
    match (resolver::investment_min(listing), resolver::investment_max(listing)) {
        (None, None) => CONTACT_FOR_DETAILS.to_string(),
        (min, max) => format!(
            "{} - {}",
            format_currency(min.unwrap_or(0.0)),
            format_currency(max.unwrap_or(0.0))
        ),
    }
}

pub fn roi(listing: &Listing) -> String {
    resolver::roi(listing)
        .map(|v| format!("{}%", format_number(v)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn locations(listing: &Listing) -> String {
    resolver::location_count(listing)
        .map(format_number)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn franchise_fee(listing: &Listing) -> String {
    resolver::franchise_fee(listing)
        .map(format_currency)
        .unwrap_or_else(|| CONTACT_FOR_DETAILS.to_string())
}

pub fn royalty_fee(listing: &Listing) -> String {
    percent_or_contact(resolver::royalty_fee(listing))
}

pub fn marketing_fee(listing: &Listing) -> String {
    percent_or_contact(resolver::marketing_fee(listing))
}

pub fn training(listing: &Listing) -> String {
    resolver::training_weeks(listing)
        .map(|v| format!("{} weeks", format_number(v)))
        .unwrap_or_else(|| CONTACT_FOR_DETAILS.to_string())
}

pub fn territory(listing: &Listing) -> String {
    resolver::territory_size(listing)
        .map(format_number)
        .unwrap_or_else(|| TERRITORY_VARIES.to_string())
}

/// Category label for cards; uncategorized listings read "General".
pub fn category_label(listing: &Listing) -> &str {
    resolver::category(listing).unwrap_or("General")
}

fn percent_or_contact(value: Option<f64>) -> String {
    value
        .map(|v| format!("{}%", format_number(v)))
        .unwrap_or_else(|| CONTACT_FOR_DETAILS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeeEntry, InvestmentEntry};

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(-45000.0), "-45,000");
        assert_eq!(format_number(4.5), "4.5");
        assert_eq!(format_number(1500.125), "1,500.125");
        assert_eq!(format_number(2.0004), "2");
    }

    #[test]
    fn investment_range_prefers_flat_pair() {
        let listing = Listing {
            total_investment_min: Some(100_000.0),
            total_investment_max: Some(250_000.0),
            investments: vec![InvestmentEntry {
                min_investment: Some(1.0),
                max_investment: Some(2.0),
            }],
            ..Default::default()
        };
        assert_eq!(investment_range(&listing), "$100,000 - $250,000");
    }

    #[test]
    fn investment_range_nested_and_missing() {
        let nested = Listing {
            investments: vec![InvestmentEntry {
                min_investment: Some(75_000.0),
                max_investment: None,
            }],
            ..Default::default()
        };
        assert_eq!(investment_range(&nested), "$75,000 - $0");
        assert_eq!(investment_range(&Listing::default()), CONTACT_FOR_DETAILS);
    }

    #[test]
    fn investment_range_agrees_with_resolver() {
        let flat_min_only = Listing {
            total_investment_min: Some(5.0),
            ..Default::default()
        };
        assert_eq!(investment_range(&flat_min_only), "$5 - $0");

        let mixed = Listing {
            total_investment_min: Some(5.0),
            investments: vec![InvestmentEntry {
                min_investment: Some(75_000.0),
                max_investment: Some(90_000.0),
            }],
            ..Default::default()
        };
        assert_eq!(investment_range(&mixed), "$5 - $90,000");

        let record_row = Listing {
            investment_min: Some(80_000.0),
            investment_max: Some(180_000.0),
            ..Default::default()
        };
        assert_eq!(investment_range(&record_row), "$80,000 - $180,000");
    }

    #[test]
    fn fee_fallbacks() {
        let listing = Listing {
            fees: vec![FeeEntry {
                initial_fee: Some(35_000.0),
                royalty_percentage: Some(6.0),
                marketing_fee_percentage: None,
            }],
            ..Default::default()
        };
        assert_eq!(franchise_fee(&listing), "$35,000");
        assert_eq!(royalty_fee(&listing), "6%");
        assert_eq!(marketing_fee(&listing), CONTACT_FOR_DETAILS);
    }

    #[test]
    fn headline_metrics_read_not_available() {
        let listing = Listing::default();
        assert_eq!(roi(&listing), NOT_AVAILABLE);
        assert_eq!(locations(&listing), NOT_AVAILABLE);
        assert_eq!(territory(&listing), TERRITORY_VARIES);
        assert_eq!(category_label(&listing), "General");
    }
}
