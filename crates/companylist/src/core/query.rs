use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Columns the directory can be filtered on, in the fixed order their
/// predicates appear in the WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterColumn {
    Region,
    PrimaryIndustry,
    SecondaryIndustry,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 3] = [
        FilterColumn::Region,
        FilterColumn::PrimaryIndustry,
        FilterColumn::SecondaryIndustry,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            FilterColumn::Region => "region",
            FilterColumn::PrimaryIndustry => "primary_industry",
            FilterColumn::SecondaryIndustry => "secondary_industry",
        }
    }

    /// Label shown over the matching multi-select widget.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Region => "Region",
            FilterColumn::PrimaryIndustry => "Primary industry",
            FilterColumn::SecondaryIndustry => "Secondary industry",
        }
    }
}

/// The user's current multi-select choices. `BTreeSet` keeps the value
/// iteration order deterministic, so the same selection always produces
/// the same query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub regions: BTreeSet<String>,
    pub primary: BTreeSet<String>,
    pub secondary: BTreeSet<String>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() && self.primary.is_empty() && self.secondary.is_empty()
    }

    pub fn values(&self, column: FilterColumn) -> &BTreeSet<String> {
        match column {
            FilterColumn::Region => &self.regions,
            FilterColumn::PrimaryIndustry => &self.primary,
            FilterColumn::SecondaryIndustry => &self.secondary,
        }
    }

    pub fn contains(&self, column: FilterColumn, value: &str) -> bool {
        self.values(column).contains(value)
    }

    /// Flips membership of `value` in the set for `column`.
    pub fn toggle(&mut self, column: FilterColumn, value: &str) {
        let set = match column {
            FilterColumn::Region => &mut self.regions,
            FilterColumn::PrimaryIndustry => &mut self.primary,
            FilterColumn::SecondaryIndustry => &mut self.secondary,
        };
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.regions.clear();
        self.primary.clear();
        self.secondary.clear();
    }

    /// Builds the WHERE fragments and the parallel parameter list for this
    /// selection. One `IN ($i, …)` fragment per non-empty set, placeholders
    /// numbered sequentially across fragments, parameters appended in set
    /// iteration order.
    pub fn to_query(&self) -> ExecutedQuery {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        for column in FilterColumn::ALL {
            let values = self.values(column);
            if values.is_empty() {
                continue;
            }
            let first = params.len() + 1;
            let placeholders = (first..first + values.len())
                .map(|n| format!("${n}"))
                .join(", ");
            conditions.push(format!("{} IN ({placeholders})", column.column_name()));
            params.extend(values.iter().cloned());
        }

        ExecutedQuery { conditions, params }
    }
}

/// A snapshot of the WHERE clause and its parameters, taken when the user
/// fetches. Export reuses the snapshot verbatim, so narrowing the widgets
/// after a fetch never changes what gets exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutedQuery {
    conditions: Vec<String>,
    params: Vec<String>,
}

impl ExecutedQuery {
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM companies{}", self.where_clause())
    }

    pub fn select_sql(&self, limit: Option<usize>) -> String {
        let base = format!("SELECT * FROM companies{}", self.where_clause());
        match limit {
            Some(n) => format!("{base} LIMIT {n}"),
            None => base,
        }
    }
}
