// Row-span computation for merged schedule cells

use crate::grid::normalize_label;
use crate::models::Row;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// How many grid rows a cell occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Span {
    /// Covered by a merge from the row above; must not render
    Covered,
    /// Renders normally, one row
    Single,
    /// Renders and occupies two rows (one hour)
    Double,
}

impl Span {
    pub fn as_u8(&self) -> u8 {
        match self {
            Span::Covered => 0,
            Span::Single => 1,
            Span::Double => 2,
        }
    }

    pub fn is_rendered(&self) -> bool {
        !matches!(self, Span::Covered)
    }
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Span for every (row index, column) of the non-time columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanMap {
    spans: HashMap<String, Vec<Span>>,
    row_count: usize,
}

impl SpanMap {
    pub fn get(&self, row_index: usize, column: &str) -> Option<Span> {
        self.spans
            .get(column)
            .and_then(|col| col.get(row_index))
            .copied()
    }

    /// All spans of one column, top to bottom
    pub fn column(&self, column: &str) -> Option<&[Span]> {
        self.spans.get(column).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }
}

/// Compute the span map for `rows`
///
/// `columns[0]` is the time column and is skipped. Equal adjacent non-empty
/// values merge pairwise from the top: a run of three gives `[2, 0, 1]`.
pub fn compute_spans(rows: &[Row], columns: &[String]) -> SpanMap {
    let mut spans = HashMap::new();

    for column in columns.iter().skip(1) {
        let values: Vec<String> = rows.iter().map(|r| normalize_label(r.get(column))).collect();
        spans.insert(column.clone(), column_spans(&values));
    }

    SpanMap {
        spans,
        row_count: rows.len(),
    }
}

fn column_spans(values: &[String]) -> Vec<Span> {
    let mut spans = vec![Span::Single; values.len()];

    for i in 0..values.len() {
        // Once covered, a cell is never reassigned
        if spans[i] == Span::Covered {
            continue;
        }
        let value = &values[i];
        if value.is_empty() {
            continue;
        }
        if values.get(i + 1) == Some(value) {
            spans[i] = Span::Double;
            spans[i + 1] = Span::Covered;
        }
    }

    spans
}
