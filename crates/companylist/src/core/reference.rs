use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};

pub const REGION_COLUMN: &str = "region";
pub const PRIMARY_COLUMN: &str = "primary_industry";
pub const SECONDARY_COLUMN: &str = "secondary_industry";

const PATH_ENV: &str = "REFERENCE_XLSX";
const DEFAULT_PATH: &str = "reference.xlsx";

/// Distinct values for the three multi-select widgets, sorted ascending.
/// Loaded once at startup; a missing or malformed file keeps the process
/// from starting.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLists {
    pub regions: Vec<String>,
    pub primary_industries: Vec<String>,
    pub secondary_industries: Vec<String>,
}

/// Path of the reference workbook, `REFERENCE_XLSX` or `reference.xlsx`.
pub fn reference_path() -> PathBuf {
    std::env::var(PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PATH))
}

/// Load the reference workbook and collect the distinct values of the
/// `region`, `primary_industry` and `secondary_industry` columns from its
/// first sheet. Empty cells count as `""` and sort like any other value.
pub fn load_reference_lists<P: AsRef<Path>>(path: P) -> anyhow::Result<ReferenceLists> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open reference workbook: {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .context("Reference workbook has no sheets")?
        .with_context(|| format!("Failed to read first sheet of {}", path.display()))?;

    lists_from_range(&range)
        .with_context(|| format!("Malformed reference workbook: {}", path.display()))
}

fn lists_from_range(range: &Range<Data>) -> anyhow::Result<ReferenceLists> {
    let mut rows = range.rows();
    let header = match rows.next() {
        Some(row) => row,
        None => bail!("Reference sheet is empty"),
    };

    let col = |name: &str| -> anyhow::Result<usize> {
        header
            .iter()
            .position(|cell| cell_text(cell) == name)
            .with_context(|| format!("Reference sheet is missing a '{name}' column"))
    };
    let region_idx = col(REGION_COLUMN)?;
    let primary_idx = col(PRIMARY_COLUMN)?;
    let secondary_idx = col(SECONDARY_COLUMN)?;

    let mut regions = BTreeSet::new();
    let mut primary = BTreeSet::new();
    let mut secondary = BTreeSet::new();

    for row in rows {
        regions.insert(cell_at(row, region_idx));
        primary.insert(cell_at(row, primary_idx));
        secondary.insert(cell_at(row, secondary_idx));
    }

    // BTreeSet iteration is already sorted ascending
    Ok(ReferenceLists {
        regions: regions.into_iter().collect(),
        primary_industries: primary.into_iter().collect(),
        secondary_industries: secondary.into_iter().collect(),
    })
}

fn cell_at(row: &[Data], idx: usize) -> String {
    row.get(idx).map(cell_text).unwrap_or_default()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
