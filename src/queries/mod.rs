//! Query modules for the franchise backend.
//!
//! Each module provides a query struct that borrows a
//! [`RestConnection`](crate::connection::RestConnection) and exposes typed
//! methods returning `Result<T>`.

pub mod categories;
pub mod collections;
pub mod insights;
pub mod listings;
pub mod questions;
pub mod saved;

pub use categories::CategoryQuery;
pub use collections::CollectionQuery;
pub use insights::InsightQuery;
pub use listings::{ListingFilter, ListingQuery};
pub use questions::QuestionQuery;
pub use saved::SavedQuery;
