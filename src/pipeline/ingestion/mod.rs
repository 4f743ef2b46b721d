//! Input-side table handling.
//!
//! The caller hands the pipeline a generic in-memory table; this module
//! turns it into typed [`InputRecord`]s. Only `numberr` and `name` are
//! mandatory. Sales rep, description and any subset of the catalog's product
//! columns are tolerated as absent, and unknown extra columns are ignored.

use std::collections::BTreeMap;

use crate::config::MergeConfig;
use crate::domain::InputRecord;
use crate::error::{MergeError, Result};

pub const COL_PHONE: &str = "numberr";
pub const COL_NAME: &str = "name";
pub const COL_SALES_REP: &str = "sp";
pub const COL_DESCRIPTION: &str = "description";
pub const COL_NO_PRODUCT: &str = "hichi";
pub const COL_PRODUCTS: &str = "products";

/// A column-ordered grid of string cells. Empty string means a blank cell.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell content, `None` when the column is absent or the cell is blank.
    fn cell<'a>(&self, row: &'a [String], column: Option<usize>) -> Option<&'a str> {
        let value = row.get(column?)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// Converts a loaded table into input records, assigning each row its
/// zero-based original order. Fails when a mandatory column is missing;
/// everything else degrades to absent fields.
pub fn load_records(table: &Table, config: &MergeConfig) -> Result<Vec<InputRecord>> {
    let phone_idx = table
        .column_index(COL_PHONE)
        .ok_or_else(|| MergeError::MissingColumn(COL_PHONE.to_string()))?;
    let name_idx = table
        .column_index(COL_NAME)
        .ok_or_else(|| MergeError::MissingColumn(COL_NAME.to_string()))?;

    let rep_idx = table.column_index(COL_SALES_REP);
    let description_idx = table.column_index(COL_DESCRIPTION);
    let product_columns: Vec<(&str, usize)> = config
        .product_codes()
        .filter_map(|code| table.column_index(code).map(|idx| (code, idx)))
        .collect();

    let records = table
        .rows
        .iter()
        .enumerate()
        .map(|(original_order, row)| {
            let mut product_flags = BTreeMap::new();
            for (code, idx) in &product_columns {
                if let Some(value) = table.cell(row, Some(*idx)) {
                    product_flags.insert(code.to_string(), value.to_string());
                }
            }

            InputRecord {
                raw_phone: table.cell(row, Some(phone_idx)).map(|s| s.to_string()),
                name: row.get(name_idx).cloned().unwrap_or_default(),
                sales_rep: table.cell(row, rep_idx).map(|s| s.to_string()),
                product_flags,
                description: table.cell(row, description_idx).map(|s| s.to_string()),
                original_order,
            }
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn missing_phone_column_is_an_error() {
        let t = table(&["name"], &[&["Ali"]]);
        let err = load_records(&t, &MergeConfig::default()).unwrap_err();
        assert!(matches!(err, MergeError::MissingColumn(c) if c == "numberr"));
    }

    #[test]
    fn missing_name_column_is_an_error() {
        let t = table(&["numberr"], &[&["09123456789"]]);
        let err = load_records(&t, &MergeConfig::default()).unwrap_err();
        assert!(matches!(err, MergeError::MissingColumn(c) if c == "name"));
    }

    #[test]
    fn optional_columns_default_to_absent() {
        let t = table(&["numberr", "name"], &[&["09123456789", "Ali"]]);
        let records = load_records(&t, &MergeConfig::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sales_rep, None);
        assert_eq!(records[0].description, None);
        assert!(records[0].product_flags.is_empty());
    }

    #[test]
    fn original_order_follows_row_position() {
        let t = table(
            &["numberr", "name"],
            &[&["09123456789", "Ali"], &["09121112233", "Sara"]],
        );
        let records = load_records(&t, &MergeConfig::default()).unwrap();

        assert_eq!(records[0].original_order, 0);
        assert_eq!(records[1].original_order, 1);
    }

    #[test]
    fn known_product_columns_are_picked_up_sparsely() {
        let t = table(
            &["numberr", "name", "chini", "unknown_col"],
            &[&["09123456789", "Ali", "1", "x"], &["09121112233", "Sara", "", "y"]],
        );
        let records = load_records(&t, &MergeConfig::default()).unwrap();

        assert_eq!(records[0].product_flags.get("chini").map(String::as_str), Some("1"));
        // blank cell stays out of the sparse map
        assert!(records[1].product_flags.is_empty());
        assert!(!records[0].product_flags.contains_key("unknown_col"));
    }

    #[test]
    fn blank_phone_cell_loads_as_absent() {
        let t = table(&["numberr", "name"], &[&["", "Ali"]]);
        let records = load_records(&t, &MergeConfig::default()).unwrap();
        assert_eq!(records[0].raw_phone, None);
    }
}
