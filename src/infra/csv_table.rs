//! CSV adapters for the in-memory [`Table`].
//!
//! The core pipeline never touches files; these adapters sit at the caller
//! boundary and map load failures to the single fatal error surface.

use std::path::Path;

use crate::error::{MergeError, Result};
use crate::pipeline::ingestion::Table;

/// Reads a CSV file into a table. Short rows are padded with blank cells so
/// downstream column lookups stay in bounds.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            MergeError::Config(format!(
                "Failed to read input file '{}': {}",
                path.display(),
                e
            ))
        })?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = Table::new(columns);
    for result in reader.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        row.resize(table.columns.len(), String::new());
        table.rows.push(row);
    }
    Ok(table)
}

/// Writes a table back out as CSV.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_headers_and_pads_short_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "numberr,name,sp\n09123456789,Ali\n").unwrap();

        let table = read_table(file.path()).unwrap();
        assert_eq!(table.columns, vec!["numberr", "name", "sp"]);
        assert_eq!(table.rows[0], vec!["09123456789", "Ali", ""]);
    }

    #[test]
    fn missing_file_is_a_single_fatal_error() {
        let err = read_table(Path::new("/nonexistent/list.csv")).unwrap_err();
        assert!(matches!(err, MergeError::Config(_)));
    }

    #[test]
    fn round_trips_a_table_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let table = Table {
            columns: vec!["numberr".to_string(), "name".to_string()],
            rows: vec![vec!["9123456789".to_string(), "Ali".to_string()]],
        };
        write_table(&table, &path).unwrap();

        let loaded = read_table(&path).unwrap();
        assert_eq!(loaded.columns, table.columns);
        assert_eq!(loaded.rows, table.rows);
    }
}
