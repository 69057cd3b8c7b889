// Comma-separated schedule export parsing

use crate::models::{Row, ScheduleTable};
use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to open schedule export {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read schedule export")]
    Io(#[from] std::io::Error),
    #[error("Malformed schedule export")]
    Csv(#[from] csv::Error),
}

/// Pick the time column from the header row
///
/// First header containing "time" (any case), else the second header,
/// else the first. `None` only when there are no headers.
pub fn detect_time_column(headers: &[String]) -> Option<String> {
    headers
        .iter()
        .find(|h| h.to_lowercase().contains("time"))
        .or_else(|| headers.get(1))
        .or_else(|| headers.first())
        .cloned()
}

/// Repeated header names get a numbered suffix ("Monday", "Monday (2)")
/// so every column keeps its own cells
fn dedupe_headers(headers: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for header in headers {
        let mut candidate = header.clone();
        let mut n = 2;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{} ({})", header, n).trim().to_string();
            n += 1;
        }
        if candidate != header {
            log::warn!("duplicate column '{}' renamed to '{}'", header, candidate);
        }
        unique.push(candidate);
    }
    unique
}

/// Parse a spreadsheet export whose first record supplies the column headers
pub fn parse_schedule_csv<R: Read>(reader: R) -> Result<ScheduleTable, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => dedupe_headers(record?.iter().map(|h| h.trim().to_string())),
        None => return Ok(ScheduleTable::default()),
    };

    let time_column = match detect_time_column(&headers) {
        Some(column) => column,
        None => return Ok(ScheduleTable::default()),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let mut row = Row::new();
        for (i, header) in headers.iter().enumerate() {
            // Ragged records: missing trailing cells read as empty
            row.set(header.clone(), record.get(i).unwrap_or(""));
        }
        rows.push(row);
    }

    log::debug!(
        "parsed schedule export: {} columns, {} rows, time column '{}'",
        headers.len(),
        rows.len(),
        time_column
    );

    Ok(ScheduleTable::new(headers, time_column, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_time_column() {
        assert_eq!(detect_time_column(&headers(&["Day", "Start TIME", "Mon"])).as_deref(), Some("Start TIME"));
        assert_eq!(detect_time_column(&headers(&["Slot", "Hour", "Mon"])).as_deref(), Some("Hour"));
        assert_eq!(detect_time_column(&headers(&["Only"])).as_deref(), Some("Only"));
        assert_eq!(detect_time_column(&[]), None);
    }

    #[test]
    fn test_parse_basic_export() {
        let data = "Time,Monday,Tuesday\n9:00,Ballet,\n9:30,Ballet,Jazz\n";
        let table = parse_schedule_csv(data.as_bytes()).unwrap();
        assert_eq!(table.columns, vec!["Time", "Monday", "Tuesday"]);
        assert_eq!(table.time_column, "Time");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("Tuesday"), "Jazz");
        assert_eq!(table.rows[0].get("Tuesday"), "");
    }

    #[test]
    fn test_parse_ragged_records() {
        let data = "Time,Monday,Tuesday\n9:00\n9:30,Tap,Jazz,extra\n";
        let table = parse_schedule_csv(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0].get("Monday"), "");
        assert_eq!(table.rows[1].get("Tuesday"), "Jazz");
        assert_eq!(table.rows[1].cells.len(), 3);
    }

    #[test]
    fn test_duplicate_headers_keep_their_cells() {
        let data = "Time,Monday,Monday,Monday (2)\n9:00,Ballet,Tap,Jazz\n";
        let table = parse_schedule_csv(data.as_bytes()).unwrap();
        assert_eq!(table.columns, vec!["Time", "Monday", "Monday (2)", "Monday (2) (2)"]);
        assert_eq!(table.rows[0].get("Monday"), "Ballet");
        assert_eq!(table.rows[0].get("Monday (2)"), "Tap");
        assert_eq!(table.rows[0].get("Monday (2) (2)"), "Jazz");
        assert_eq!(table.rows[0].cells.len(), 4);
    }

    #[test]
    fn test_parse_quoted_values() {
        let data = "Time,Monday\n9:00,\"Hip Hop, Level 2\"\n";
        let table = parse_schedule_csv(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0].get("Monday"), "Hip Hop, Level 2");
    }

    #[test]
    fn test_parse_empty_input() {
        let table = parse_schedule_csv("".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }

    #[test]
    fn test_parse_headers_only() {
        let table = parse_schedule_csv("Time,Monday\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.time_column, "Time");
    }
}
