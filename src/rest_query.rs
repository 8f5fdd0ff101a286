//! PostgREST query builder.
//!
//! Produces the `(key, value)` query pairs for a table request. Values are
//! passed to the HTTP client as query parameters and URL-encoded there,
//! never spliced into the path. Builder methods return `&mut Self` for
//! chaining.
//!
//! # Example
//!
//! ```rust
//! use franchise_insights::RestQuery;
//! let params = RestQuery::new()
//!     .select("id,name")
//!     .eq("category", "Retail")
//!     .ilike("name", "*taco*")
//!     .order("name", true)
//!     .limit(10)
//!     .build();
//! assert_eq!(params[0], ("select".to_string(), "id,name".to_string()));
//! ```

/// Builds PostgREST filter, ordering and pagination parameters.
#[derive(Debug, Clone, Default)]
pub struct RestQuery {
    select_cols: Option<String>,
    filters: Vec<(String, String)>,
    or_groups: Vec<String>,
    order_cols: Vec<String>,
    limit_val: Option<usize>,
    offset_val: Option<usize>,
}

impl RestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `select` expression (defaults to `*` on the server).
    pub fn select(&mut self, cols: &str) -> &mut Self {
        self.select_cols = Some(cols.to_string());
        self
    }

    /// Raw filter: `column=op.value`.
    pub fn filter(&mut self, column: &str, op: &str, value: &str) -> &mut Self {
        self.filters.push((column.to_string(), format!("{}.{}", op, value)));
        self
    }

    /// Equality: `column=eq.value`.
    pub fn eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.filter(column, "eq", value)
    }

    /// Case-insensitive pattern match; `*` is the wildcard.
    pub fn ilike(&mut self, column: &str, pattern: &str) -> &mut Self {
        self.filter(column, "ilike", pattern)
    }

    pub fn gte(&mut self, column: &str, value: &str) -> &mut Self {
        self.filter(column, "gte", value)
    }

    pub fn lte(&mut self, column: &str, value: &str) -> &mut Self {
        self.filter(column, "lte", value)
    }

    /// OR-combined conditions, each given as `(column, op, value)`.
    ///
    /// Produces `or=(c1.op1.v1,c2.op2.v2)`. Several calls are AND-ed.
    pub fn or(&mut self, conditions: &[(&str, &str, &str)]) -> &mut Self {
        if conditions.is_empty() {
            return self;
        }
        let parts: Vec<String> = conditions
            .iter()
            .map(|(col, op, val)| format!("{}.{}.{}", col, op, quote(val)))
            .collect();
        self.or_groups.push(format!("({})", parts.join(",")));
        self
    }

    pub fn order(&mut self, column: &str, ascending: bool) -> &mut Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.order_cols.push(format!("{}.{}", column, dir));
        self
    }

    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset_val = Some(n);
        self
    }

    /// Build the final query pairs in a stable order: select, filters, or
    /// groups, order, limit, offset.
    pub fn build(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(ref cols) = self.select_cols {
            pairs.push(("select".to_string(), cols.clone()));
        }

        pairs.extend(self.filters.iter().cloned());

        for group in &self.or_groups {
            pairs.push(("or".to_string(), group.clone()));
        }

        if !self.order_cols.is_empty() {
            pairs.push(("order".to_string(), self.order_cols.join(",")));
        }

        if let Some(n) = self.limit_val {
            pairs.push(("limit".to_string(), n.to_string()));
        }

        if let Some(n) = self.offset_val {
            pairs.push(("offset".to_string(), n.to_string()));
        }

        pairs
    }
}

/// Escape LIKE metacharacters so user text matches literally inside an
/// `ilike` pattern. PostgREST's `*` wildcard has no escape and is left as is.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Double-quote values containing PostgREST list delimiters.
fn quote(value: &str) -> String {
    if value.contains([',', '(', ')', '"', ':']) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}
