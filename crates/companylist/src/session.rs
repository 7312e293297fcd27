use chrono::{DateTime, Local};

use crate::core::query::{ExecutedQuery, FilterSelection};
use crate::core::record::CompanyRecord;
use crate::db::{CompanyStore, StoreError};
use crate::export::{ExportError, ExportFile, encode_workbook, export_file_name};
use crate::{EXPORT_ROW_LIMIT, PREVIEW_LIMIT};

/// Outcome of the most recent fetch: the total match count plus a preview
/// capped at [`PREVIEW_LIMIT`] rows. Stale until the next fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub total_count: i64,
    pub preview: Vec<CompanyRecord>,
}

/// Per-session state for one user's interactions.
///
/// `selection` is what the widgets currently show; `executed` is the filter
/// snapshot taken by the last successful fetch. Export always consumes the
/// snapshot, so widget changes made after a fetch have no effect on it
/// until the user fetches again.
#[derive(Debug, Default)]
pub struct Session {
    pub selection: FilterSelection,
    executed: Option<ExecutedQuery>,
    results: Option<ResultSet>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Last fetch outcome. `None` means no fetch has happened since the
    /// session started or was reset.
    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn last_executed(&self) -> Option<&ExecutedQuery> {
        self.executed.as_ref()
    }

    /// Run the current selection against the store: count query first,
    /// then the preview query. On success the filter snapshot and the
    /// result set are replaced; on failure both are left as they were.
    pub fn fetch(&mut self, store: &dyn CompanyStore) -> Result<(), StoreError> {
        let query = self.selection.to_query();
        let total_count = store.count(&query)?;
        let preview = store.fetch(&query, Some(PREVIEW_LIMIT))?;

        tracing::info!(
            total_count,
            preview_rows = preview.len(),
            conditions = query.conditions().len(),
            "fetched preview"
        );

        self.executed = Some(query);
        self.results = Some(ResultSet {
            total_count,
            preview,
        });
        Ok(())
    }

    /// Export every row matching the last executed filter as a workbook.
    ///
    /// Rows are materialized before the row-count guard is applied, which
    /// matches how the count is obtained in the first place. Refused when
    /// no fetch has happened, when the snapshot matches nothing, or when
    /// it matches more than [`EXPORT_ROW_LIMIT`] rows.
    pub fn export(
        &self,
        store: &dyn CompanyStore,
        now: DateTime<Local>,
    ) -> Result<ExportFile, ExportError> {
        let query = self.executed.as_ref().ok_or(ExportError::NoFetch)?;

        let rows = store.fetch(query, None)?;
        if rows.is_empty() {
            return Err(ExportError::Empty);
        }
        if rows.len() > EXPORT_ROW_LIMIT {
            tracing::warn!(rows = rows.len(), "export refused, result set too large");
            return Err(ExportError::TooLarge {
                rows: rows.len(),
                limit: EXPORT_ROW_LIMIT,
            });
        }

        let bytes = encode_workbook(&rows)?;
        tracing::info!(rows = rows.len(), bytes = bytes.len(), "encoded export workbook");
        Ok(ExportFile {
            file_name: export_file_name(now),
            bytes,
            rows: rows.len(),
        })
    }

    /// Back to the initial state: empty widgets, no snapshot, no results.
    pub fn reset(&mut self) {
        *self = Session::default();
        tracing::info!("session reset");
    }
}
