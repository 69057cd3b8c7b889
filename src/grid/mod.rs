//! Schedule grid builder
//!
//! Turns a [`ScheduleTable`] into a render-ready grid: identical adjacent
//! class names merge into two-row cells, populated cells get a color token,
//! and empty cells at the top of an hour are marked bookable.

pub mod color;
pub mod slot;
pub mod span;

pub use color::*;
pub use slot::*;
pub use span::*;

use crate::models::ScheduleTable;
use serde::Serialize;

/// Trim and lower-case a class label for comparison
pub fn normalize_label(value: &str) -> String {
    value.trim().to_lowercase()
}

/// One cell of the render model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub column: String,
    pub value: String,
    pub span: Span,
    pub color: String,
    pub bookable: bool,
}

/// One time slot of the render model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub index: usize,
    pub time: String,
    pub cells: Vec<GridCell>,
}

/// Render-ready schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleGrid {
    pub time_column: String,
    pub columns: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl ScheduleGrid {
    /// Derive the full grid from the table. Spans and colors are recomputed
    /// from scratch on every call.
    pub fn build(table: &ScheduleTable, colors: &ColorMap) -> Self {
        let order = table.column_order();
        let spans = compute_spans(&table.rows, &order);
        let day_columns: Vec<String> = order.iter().skip(1).cloned().collect();

        let rows = table
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cells = day_columns
                    .iter()
                    .map(|column| {
                        let value = row.get(column);
                        let span = spans.get(index, column).unwrap_or(Span::Single);
                        GridCell {
                            column: column.clone(),
                            value: value.to_string(),
                            span,
                            color: colors.classify(value).to_string(),
                            bookable: is_bookable(table, index, column),
                        }
                    })
                    .collect();
                GridRow {
                    index,
                    time: row.get(&table.time_column).trim().to_string(),
                    cells,
                }
            })
            .collect();

        log::debug!(
            "built schedule grid: {} rows x {} day columns",
            table.rows.len(),
            day_columns.len()
        );

        Self {
            time_column: table.time_column.clone(),
            columns: day_columns,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of cells that render (span != 0) in a column
    pub fn rendered_cells(&self, column: &str) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.column == column && c.span.is_rendered())
            .count()
    }
}
