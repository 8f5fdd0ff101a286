//! Ask-AI question queries.

use tracing::{info, warn};

use crate::config::QUESTIONS_TABLE;
use crate::connection::RestConnection;
use crate::models::AiQuestion;
use crate::rest_query::RestQuery;

pub struct QuestionQuery<'a> {
    conn: &'a RestConnection,
}

impl<'a> QuestionQuery<'a> {
    pub fn new(conn: &'a RestConnection) -> Self {
        Self { conn }
    }

    /// Stored questions, newest first. Failures yield an empty list.
    pub fn list(&self) -> Vec<AiQuestion> {
        let mut qb = RestQuery::new();
        qb.select("*").order("created_at", false);
        match self.conn.select::<AiQuestion>(QUESTIONS_TABLE, &qb, None) {
            Ok(rows) => {
                info!(count = rows.len(), "fetched ai questions");
                rows
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch ai questions");
                Vec::new()
            }
        }
    }
}
