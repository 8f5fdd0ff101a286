//! Listing queries against the franchise tables.

use tracing::{info, warn};

use crate::config::{self, LISTINGS_TABLE, LISTING_SELECT};
use crate::connection::RestConnection;
use crate::error::{FranchiseError, Result};
use crate::models::Listing;
use crate::resolver;
use crate::rest_query::{escape_like, RestQuery};
use crate::stats::{self, ListingStatistics};

// ---------------------------------------------------------------------------
// ListingFilter
// ---------------------------------------------------------------------------

/// Filters for listing search.
///
/// All fields are optional. When `None`, the corresponding filter is
/// skipped. A `category` of `"all"` (any case) also means no category filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    /// Case-insensitive substring over name, brand name, description and category.
    pub search: Option<String>,
    /// Case-insensitive exact category match.
    pub category: Option<String>,
    pub investment_min_gte: Option<f64>,
    pub investment_max_lte: Option<f64>,
    pub roi_gte: Option<f64>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListingFilter {
    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn category_term(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
    }

    /// Add this filter's conditions to a PostgREST query.
    ///
    /// Server-side comparisons only see the flat columns; use
    /// [`matches`](Self::matches) to filter on resolved values.
    pub fn apply(&self, qb: &mut RestQuery) {
        if let Some(term) = self.search_term() {
            let pattern = format!("*{}*", escape_like(term));
            qb.or(&[
                ("name", "ilike", pattern.as_str()),
                ("brand_name", "ilike", pattern.as_str()),
                ("description", "ilike", pattern.as_str()),
                ("category", "ilike", pattern.as_str()),
            ]);
        }

        // Case-insensitive equality: ilike with no wildcards.
        if let Some(category) = self.category_term() {
            qb.ilike("category", &escape_like(category));
        }

        if let Some(v) = self.investment_min_gte {
            qb.gte("total_investment_min", &v.to_string());
        }

        if let Some(v) = self.investment_max_lte {
            qb.lte("total_investment_max", &v.to_string());
        }

        if let Some(v) = self.roi_gte {
            qb.gte("estimated_roi", &v.to_string());
        }

        if let Some(l) = self.limit {
            qb.limit(l);
        }
        if let Some(o) = self.offset {
            qb.offset(o);
        }
    }

    /// Evaluate the filter in-process against resolved listing values.
    ///
    /// Numeric bounds exclude listings whose value is unavailable.
    /// Pagination is ignored.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(term) = self.search_term() {
            let needle = term.to_lowercase();
            let haystacks = [
                listing.name.as_deref(),
                listing.brand_name.as_deref(),
                listing.description.as_deref(),
                resolver::category(listing),
            ];
            let hit = haystacks
                .iter()
                .flatten()
                .any(|h| h.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(category) = self.category_term() {
            match resolver::category(listing) {
                Some(c) if c.to_lowercase() == category.to_lowercase() => {}
                _ => return false,
            }
        }

        let at_least = |value: Option<f64>, bound: Option<f64>| match bound {
            Some(b) => value.is_some_and(|v| v >= b),
            None => true,
        };
        let at_most = |value: Option<f64>, bound: Option<f64>| match bound {
            Some(b) => value.is_some_and(|v| v <= b),
            None => true,
        };

        at_least(resolver::investment_min(listing), self.investment_min_gte)
            && at_most(resolver::investment_max(listing), self.investment_max_lte)
            && at_least(resolver::roi(listing), self.roi_gte)
    }

    /// Filter an already fetched list in place of a server round trip.
    pub fn filter_local<'l>(&self, listings: &'l [Listing]) -> Vec<&'l Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

// ---------------------------------------------------------------------------
// ListingQuery
// ---------------------------------------------------------------------------

/// Query interface for franchise listings.
pub struct ListingQuery<'a> {
    conn: &'a RestConnection,
}

impl<'a> ListingQuery<'a> {
    /// Create a new `ListingQuery` bound to the given connection.
    pub fn new(conn: &'a RestConnection) -> Self {
        Self { conn }
    }

    /// Fetch listings with their nested joins, ordered by name.
    pub fn list(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        let mut qb = RestQuery::new();
        qb.select(LISTING_SELECT).order("name", true);
        filter.apply(&mut qb);

        let rows: Vec<Listing> = self.conn.select(LISTINGS_TABLE, &qb, None)?;
        info!(count = rows.len(), "fetched franchise listings");
        Ok(rows)
    }

    /// Fetch one listing by id, or `None` when no table has it.
    ///
    /// The primary table is queried with its joins; the legacy tables are
    /// tried after it without joins. Connectivity failures are returned
    /// immediately; a backend error is only returned when every table failed.
    pub fn get(&self, id: &str) -> Result<Option<Listing>> {
        let mut first_err: Option<FranchiseError> = None;
        let mut answered = false;

        let tables = std::iter::once((LISTINGS_TABLE, LISTING_SELECT))
            .chain(config::LOOKUP_FALLBACK_TABLES.iter().map(|t| (*t, "*")));

        for (table, select) in tables {
            let mut qb = RestQuery::new();
            qb.select(select).eq("id", id).limit(1);

            match self.conn.select::<Listing>(table, &qb, None) {
                Ok(rows) => {
                    answered = true;
                    if let Some(listing) = rows.into_iter().next() {
                        return Ok(Some(listing));
                    }
                }
                Err(e) if e.is_connectivity() => return Err(e),
                Err(e) => {
                    warn!(table, error = %e, "listing lookup failed, trying next table");
                    first_err.get_or_insert(e);
                }
            }
        }

        match (answered, first_err) {
            (false, Some(e)) => Err(e),
            _ => Ok(None),
        }
    }

    /// Fetch all rows from the first record table that has any.
    ///
    /// Returns the rows with the name of the table they came from.
    pub fn records(&self) -> Result<(Vec<Listing>, String)> {
        for table in config::RECORD_TABLES {
            let mut qb = RestQuery::new();
            qb.select("*").order("name", true);

            match self.conn.select::<Listing>(table, &qb, None) {
                Ok(rows) if !rows.is_empty() => {
                    info!(table, count = rows.len(), "fetched franchise records");
                    return Ok((rows, table.to_string()));
                }
                Ok(_) => warn!(table, "record table is empty, trying next"),
                Err(e) if e.is_connectivity() => return Err(e),
                Err(e) => warn!(table, error = %e, "record table unavailable, trying next"),
            }
        }
        Err(FranchiseError::NotFound(
            "No franchise data tables found in database".to_string(),
        ))
    }

    /// Number of listings in the primary table.
    pub fn count(&self) -> Result<usize> {
        let mut qb = RestQuery::new();
        qb.select("id");
        Ok(self.conn.select_values(LISTINGS_TABLE, &qb)?.len())
    }

    /// Fetch listings and aggregate them.
    pub fn statistics(&self, filter: &ListingFilter) -> Result<ListingStatistics> {
        Ok(stats::build_statistics(&self.list(filter)?))
    }

    /// Stored side-by-side comparisons as raw rows. Failures yield an
    /// empty list.
    pub fn comparisons(&self) -> Vec<serde_json::Value> {
        let mut qb = RestQuery::new();
        qb.select("*");
        match self.conn.select_values(config::COMPARISONS_TABLE, &qb) {
            Ok(rows) => {
                info!(count = rows.len(), "fetched comparisons");
                rows
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch comparisons");
                Vec::new()
            }
        }
    }
}
