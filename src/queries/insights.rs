//! Industry insight queries.

use tracing::{info, warn};

use crate::config::INSIGHTS_TABLE;
use crate::connection::RestConnection;
use crate::error::Result;
use crate::models::IndustryInsight;
use crate::queries::listings::{ListingFilter, ListingQuery};
use crate::rest_query::RestQuery;
use crate::stats::ListingStatistics;

/// Query interface for the insights page.
pub struct InsightQuery<'a> {
    conn: &'a RestConnection,
}

impl<'a> InsightQuery<'a> {
    pub fn new(conn: &'a RestConnection) -> Self {
        Self { conn }
    }

    /// Editorial insights, newest first.
    ///
    /// Insights are optional page content, so any failure is logged and an
    /// empty list returned.
    pub fn list(&self) -> Vec<IndustryInsight> {
        let mut qb = RestQuery::new();
        qb.select("*").order("created_at", false);
        match self.conn.select::<IndustryInsight>(INSIGHTS_TABLE, &qb, None) {
            Ok(rows) => {
                info!(count = rows.len(), "fetched industry insights");
                rows
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch industry insights");
                Vec::new()
            }
        }
    }

    /// Statistics over every listing: category distribution, average
    /// investment bounds and ROI, ROI per category.
    pub fn industry_statistics(&self) -> Result<ListingStatistics> {
        ListingQuery::new(self.conn).statistics(&ListingFilter::default())
    }
}
