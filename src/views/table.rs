//! Table view
//!
//! The whole history window as rows, oldest first.

use serde::Serialize;

use super::error::{ViewError, ViewResult};
use crate::sampler::{Reading, Snapshot};

/// Column names, in row order
pub const TABLE_COLUMNS: [&str; 3] = ["timestamp", "arctic_temp", "antarctic_temp"];

/// One row per reading
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableRow {
    pub timestamp: String,
    pub arctic_temp: f64,
    pub antarctic_temp: f64,
}

impl From<&Reading> for TableRow {
    fn from(reading: &Reading) -> Self {
        Self {
            timestamp: reading.timestamp_label(),
            arctic_temp: reading.arctic_temp,
            antarctic_temp: reading.antarctic_temp,
        }
    }
}

/// Tabular form of a snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as CSV with a header line
    pub fn to_csv(&self) -> ViewResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ViewError::Encoding(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ViewError::Encoding(e.to_string()))
    }
}

/// Build the table for a snapshot. An empty history gives an empty table.
pub fn table(snapshot: &Snapshot) -> Table {
    Table {
        columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: snapshot.readings.iter().map(TableRow::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(second: u32, arctic: f64, antarctic: f64) -> Reading {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, second)
            .unwrap();
        Reading::new(arctic, antarctic, ts)
    }

    #[test]
    fn test_table_rows_in_insertion_order() {
        let snapshot = Snapshot {
            readings: vec![reading(0, -17.0, -16.5), reading(5, -16.0, -17.2)],
            capacity: 20,
            sequence: 2,
        };

        let table = table(&snapshot);
        assert_eq!(table.columns, TABLE_COLUMNS.to_vec());
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].timestamp, "2024-01-15 10:00:00");
        assert_eq!(table.rows[1].arctic_temp, -16.0);
        assert_eq!(table.rows[1].antarctic_temp, -17.2);
    }

    #[test]
    fn test_empty_table() {
        let table = table(&Snapshot::empty(20));
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 3);
    }

    #[test]
    fn test_to_csv() {
        let snapshot = Snapshot {
            readings: vec![reading(0, -17.0, -16.5), reading(5, -16.1, -17.2)],
            capacity: 20,
            sequence: 2,
        };

        let csv = table(&snapshot).to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "timestamp,arctic_temp,antarctic_temp");
        assert_eq!(lines[1], "2024-01-15 10:00:00,-17.0,-16.5");
        assert_eq!(lines[2], "2024-01-15 10:00:05,-16.1,-17.2");
    }

    #[test]
    fn test_empty_csv_has_header_only() {
        let csv = table(&Snapshot::empty(20)).to_csv().unwrap();
        assert_eq!(csv, "timestamp,arctic_temp,antarctic_temp\n");
    }
}
