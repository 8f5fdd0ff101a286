//! Category queries.

use tracing::info;

use crate::config::CATEGORIES_TABLE;
use crate::connection::RestConnection;
use crate::error::Result;
use crate::models::Category;
use crate::rest_query::RestQuery;

/// Query interface for listing categories.
pub struct CategoryQuery<'a> {
    conn: &'a RestConnection,
}

impl<'a> CategoryQuery<'a> {
    pub fn new(conn: &'a RestConnection) -> Self {
        Self { conn }
    }

    /// All categories ordered by name.
    pub fn list(&self) -> Result<Vec<Category>> {
        let mut qb = RestQuery::new();
        qb.select("*").order("name", true);
        let rows: Vec<Category> = self.conn.select(CATEGORIES_TABLE, &qb, None)?;
        info!(count = rows.len(), "fetched categories");
        Ok(rows)
    }

    /// Filter options for the browse page: `"all"` followed by each
    /// named category's lowercased name.
    pub fn filter_options(&self) -> Result<Vec<String>> {
        Ok(filter_options(&self.list()?))
    }
}

pub fn filter_options(categories: &[Category]) -> Vec<String> {
    std::iter::once("all".to_string())
        .chain(categories.iter().filter_map(Category::key))
        .collect()
}
