use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use companylist::core::record::{COLUMN_NAMES, CompanyRecord};
use companylist::export::encode_workbook;

fn record(id: i64) -> CompanyRecord {
    CompanyRecord {
        name: format!("Company {id}"),
        region: "Tokyo".into(),
        address: format!("{id}-1-1 Chiyoda"),
        phone: "03-1234-5678".into(),
        primary_industry: "Manufacturing".into(),
        secondary_industry: "Retail".into(),
        capital: 10_000 + id,
        employee_count: 50 + id,
        founding_year: 1990,
        revenue: 200_000 + id,
        representative: "T. Suzuki".into(),
        suppliers: "Supplier A".into(),
        customers: "Customer B".into(),
        shareholders: "Holder C".into(),
        id,
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[test]
fn exported_workbook_round_trips() -> anyhow::Result<()> {
    let records: Vec<CompanyRecord> = (1..=47).map(record).collect();
    let bytes = encode_workbook(&records)?;

    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    let sheets = workbook.sheet_names().to_vec();
    assert_eq!(sheets.len(), 1, "export must contain exactly one sheet");

    let range = workbook.worksheet_range(&sheets[0])?;
    let mut rows = range.rows();

    // header row carries the 15 column names verbatim, no index column
    let header: Vec<String> = rows.next().expect("missing header row").iter().map(cell_text).collect();
    assert_eq!(header, COLUMN_NAMES);

    // 47 data rows in the original order, every field intact
    let data_rows: Vec<Vec<String>> = rows.map(|r| r.iter().map(cell_text).collect()).collect();
    assert_eq!(data_rows.len(), records.len());
    for (row, record) in data_rows.iter().zip(&records) {
        assert_eq!(row.as_slice(), record.cells().as_slice());
    }

    Ok(())
}

#[test]
fn header_only_workbook_for_no_rows() -> anyhow::Result<()> {
    let bytes = encode_workbook(&[])?;

    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    let sheets = workbook.sheet_names().to_vec();
    let range = workbook.worksheet_range(&sheets[0])?;

    assert_eq!(range.rows().count(), 1);
    Ok(())
}
