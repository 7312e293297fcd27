use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The `companies` table columns, in wire order. `id` is last.
pub const COLUMN_NAMES: [&str; 15] = [
    "name",
    "region",
    "address",
    "phone",
    "primary_industry",
    "secondary_industry",
    "capital",
    "employee_count",
    "founding_year",
    "revenue",
    "representative",
    "suppliers",
    "customers",
    "shareholders",
    "id",
];

/// One row of the company directory, mapped verbatim from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompanyRecord {
    pub name: String,
    pub region: String,
    pub address: String,
    pub phone: String,
    pub primary_industry: String,
    pub secondary_industry: String,
    pub capital: i64,
    pub employee_count: i64,
    pub founding_year: i64,
    pub revenue: i64,
    pub representative: String,
    pub suppliers: String,
    pub customers: String,
    pub shareholders: String,
    pub id: i64,
}

impl CompanyRecord {
    /// Cell values in [`COLUMN_NAMES`] order, stringified for display
    /// and for the export sheet.
    pub fn cells(&self) -> [String; 15] {
        [
            self.name.clone(),
            self.region.clone(),
            self.address.clone(),
            self.phone.clone(),
            self.primary_industry.clone(),
            self.secondary_industry.clone(),
            self.capital.to_string(),
            self.employee_count.to_string(),
            self.founding_year.to_string(),
            self.revenue.to_string(),
            self.representative.clone(),
            self.suppliers.clone(),
            self.customers.clone(),
            self.shareholders.clone(),
            self.id.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_follow_column_order() {
        let rec = CompanyRecord {
            name: "Acme".into(),
            region: "Tokyo".into(),
            address: "1-1-1".into(),
            phone: "03-0000-0000".into(),
            primary_industry: "Manufacturing".into(),
            secondary_industry: "Retail".into(),
            capital: 5_000,
            employee_count: 120,
            founding_year: 1987,
            revenue: 90_000,
            representative: "A. Founder".into(),
            suppliers: "S1".into(),
            customers: "C1".into(),
            shareholders: "H1".into(),
            id: 42,
        };

        let cells = rec.cells();
        assert_eq!(cells.len(), COLUMN_NAMES.len());
        assert_eq!(cells[0], "Acme");
        assert_eq!(cells[1], "Tokyo");
        assert_eq!(cells[14], "42");
    }
}
