use rust_xlsxwriter::Workbook;

use companylist::core::reference::load_reference_lists;

/// Write a reference workbook the way the master file looks: header row
/// plus one row per company, with the occasional blank cell.
fn write_reference(path: &std::path::Path) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let rows = [
        ["region", "primary_industry", "secondary_industry"],
        ["Tokyo", "Manufacturing", "Retail"],
        ["Osaka", "Agriculture", ""],
        ["Tokyo", "Manufacturing", "Logistics"],
        ["Aichi", "", "Retail"],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32, c as u16, *value)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[test]
fn loads_sorted_distinct_lists_from_workbook() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("reference.xlsx");
    write_reference(&path)?;

    let lists = load_reference_lists(&path)?;

    assert_eq!(lists.regions, ["Aichi", "Osaka", "Tokyo"]);
    assert_eq!(lists.primary_industries, ["", "Agriculture", "Manufacturing"]);
    assert_eq!(lists.secondary_industries, ["", "Logistics", "Retail"]);
    Ok(())
}

#[test]
fn missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.xlsx");

    assert!(load_reference_lists(&path).is_err());
}
