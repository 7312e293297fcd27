use thiserror::Error;

use crate::core::query::ExecutedQuery;
use crate::core::record::CompanyRecord;

pub mod config;
pub mod postgres;

/// Connection or query failure. Surfaced to the user for the current
/// interaction only; never retried automatically.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The only contract the workflow needs from the relational store: run a
/// count query or a row query built from an [`ExecutedQuery`] snapshot.
pub trait CompanyStore {
    /// `SELECT COUNT(*)` with the snapshot's predicates.
    fn count(&self, query: &ExecutedQuery) -> Result<i64, StoreError>;

    /// `SELECT *` with the snapshot's predicates, optionally limited.
    fn fetch(
        &self,
        query: &ExecutedQuery,
        limit: Option<usize>,
    ) -> Result<Vec<CompanyRecord>, StoreError>;
}
