use chrono::{DateTime, Local};
use rust_xlsxwriter::Workbook;
use thiserror::Error;

use crate::core::record::{COLUMN_NAMES, CompanyRecord};
use crate::db::StoreError;

/// Why an export produced no file. Everything except `Store` leaves the
/// session untouched so the user can narrow the selection and retry.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export yet. Fetch a selection first.")]
    NoFetch,
    #[error("No companies match the stored filter.")]
    Empty,
    #[error(
        "Too many rows to export ({rows}). Only {limit} rows or fewer can be \
         exported; narrow the selection and try again."
    )]
    TooLarge { rows: usize, limit: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to build workbook: {0}")]
    Encode(#[from] rust_xlsxwriter::XlsxError),
}

/// A finished export: workbook bytes plus the timestamped name to offer
/// in the save dialog.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

/// Serialize rows into a single-sheet workbook: header row with the 15
/// column names, one row per record, no index column.
pub fn encode_workbook(rows: &[CompanyRecord]) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in COLUMN_NAMES.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (row, record) in rows.iter().enumerate() {
        for (col, cell) in record.cells().iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, cell.as_str())?;
        }
    }

    workbook.save_to_buffer()
}

/// `companylist_YYYYMMDD_HHMMSS.xlsx`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("companylist_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_embeds_timestamp() {
        let now = Local.with_ymd_and_hms(2026, 8, 30, 9, 5, 7).unwrap();
        assert_eq!(export_file_name(now), "companylist_20260830_090507.xlsx");
    }

    #[test]
    fn empty_row_set_still_yields_header_only_workbook() {
        // The export guards refuse empty exports before encoding; the
        // encoder itself doesn't care.
        let bytes = encode_workbook(&[]).unwrap();
        assert!(!bytes.is_empty());
    }
}
