use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One time slot of the schedule: column name -> cell value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from (column, value) pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Cell value for a column; a missing column reads as empty
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }
}

/// Schedule table as parsed from a spreadsheet export
///
/// `columns` keeps header order. `time_column` names the time-of-day column,
/// which is excluded from merge and color logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTable {
    pub columns: Vec<String>,
    pub time_column: String,
    pub rows: Vec<Row>,
}

impl ScheduleTable {
    pub fn new(columns: Vec<String>, time_column: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            time_column: time_column.into(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Time column first, then every other column in header order
    pub fn column_order(&self) -> Vec<String> {
        let mut order = Vec::with_capacity(self.columns.len() + 1);
        order.push(self.time_column.clone());
        order.extend(
            self.columns
                .iter()
                .filter(|c| **c != self.time_column)
                .cloned(),
        );
        order
    }

    /// Columns that carry classes (everything except the time column)
    pub fn day_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| **c != self.time_column)
            .map(String::as_str)
            .collect()
    }

    pub fn has_day_column(&self, column: &str) -> bool {
        column != self.time_column && self.columns.iter().any(|c| c == column)
    }

    /// Time label of a row, trimmed
    pub fn time_at(&self, row_index: usize) -> Option<&str> {
        self.rows
            .get(row_index)
            .map(|row| row.get(&self.time_column).trim())
    }

    /// Index of the first row whose time label equals `label` (trimmed)
    pub fn find_row_by_time(&self, label: &str) -> Option<usize> {
        let wanted = label.trim();
        self.rows
            .iter()
            .position(|row| row.get(&self.time_column).trim() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ScheduleTable {
        ScheduleTable::new(
            vec!["Monday".into(), "Time".into(), "Tuesday".into()],
            "Time",
            vec![
                Row::from_pairs([("Time", "9:00"), ("Monday", "Ballet")]),
                Row::from_pairs([("Time", " 9:30 "), ("Tuesday", "Jazz")]),
            ],
        )
    }

    #[test]
    fn test_missing_cell_reads_empty() {
        let t = table();
        assert_eq!(t.rows[0].get("Tuesday"), "");
        assert_eq!(t.rows[0].get("Nope"), "");
    }

    #[test]
    fn test_column_order_puts_time_first() {
        assert_eq!(table().column_order(), vec!["Time", "Monday", "Tuesday"]);
        assert_eq!(table().day_columns(), vec!["Monday", "Tuesday"]);
    }

    #[test]
    fn test_find_row_by_time() {
        let t = table();
        assert_eq!(t.find_row_by_time("9:30"), Some(1));
        assert_eq!(t.find_row_by_time("10:00"), None);
        assert_eq!(t.time_at(1), Some("9:30"));
        assert_eq!(t.time_at(5), None);
    }

    #[test]
    fn test_has_day_column() {
        let t = table();
        assert!(t.has_day_column("Monday"));
        assert!(!t.has_day_column("Time"));
        assert!(!t.has_day_column("Sunday"));
    }
}
