// Empty-slot booking inquiries
//
// An empty cell at the top of a one-hour block can be turned into a
// prefilled contact inquiry. Nothing is reserved; this only derives text.

use crate::models::ScheduleTable;
use chrono::{Duration, NaiveTime, Timelike};
use serde::Serialize;

/// Half-hour rows per booking hour
pub const ROWS_PER_HOUR: usize = 2;

/// Contact path used when none is configured
pub const DEFAULT_CONTACT_ROUTE: &str = "/contact";

/// Query parameter that carries the inquiry message
pub const MESSAGE_PARAM: &str = "message";

/// Whether a row starts a one-hour booking block
///
/// Tied to a grid of `ROWS_PER_HOUR` rows per hour. If the export's row
/// granularity changes, this is the one place to re-derive it.
pub fn starts_booking_block(row_index: usize) -> bool {
    row_index % ROWS_PER_HOUR == 0
}

/// A prefilled inquiry for an empty slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingInquiry {
    pub day: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub message: String,
    pub route: String,
}

/// Slot start time in `H:MM` or `HH:MM` form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTime {
    time: NaiveTime,
    padded: bool,
}

impl SlotTime {
    /// Parse `H:MM` / `HH:MM`; anything else is `None`
    pub fn parse(label: &str) -> Option<Self> {
        let (hours, minutes) = label.trim().split_once(':')?;
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return None;
        }
        if !hours.bytes().all(|b| b.is_ascii_digit()) || !minutes.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let h: u32 = hours.parse().ok()?;
        let m: u32 = minutes.parse().ok()?;
        let time = NaiveTime::from_hms_opt(h, m, 0)?;
        Some(Self {
            time,
            padded: hours.len() == 2,
        })
    }

    /// One hour later, wrapping at midnight
    pub fn plus_one_hour(&self) -> Self {
        let (time, _) = self.time.overflowing_add_signed(Duration::hours(1));
        Self {
            time,
            padded: self.padded,
        }
    }

    pub fn format(&self) -> String {
        if self.padded {
            format!("{:02}:{:02}", self.time.hour(), self.time.minute())
        } else {
            format!("{}:{:02}", self.time.hour(), self.time.minute())
        }
    }
}

/// Whether the cell at (row, column) can start a booking inquiry
pub fn is_bookable(table: &ScheduleTable, row_index: usize, column: &str) -> bool {
    if !table.has_day_column(column) || !starts_booking_block(row_index) {
        return false;
    }
    match table.rows.get(row_index) {
        Some(row) => row.get(column).trim().is_empty(),
        None => false,
    }
}

/// Compose the inquiry sentence for a day and optional time range
pub fn compose_inquiry(day: &str, start: Option<&str>, end: Option<&str>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!(
            "I'd like to reserve recurring classes on {} between {} and {}.",
            day, start, end
        ),
        (Some(start), None) => format!("I'd like to reserve recurring classes on {} at {}.", day, start),
        _ => format!("I'd like to reserve recurring classes on {}.", day),
    }
}

/// Contact route carrying `message` as its single query parameter
pub fn inquiry_route(contact_route: &str, message: &str) -> String {
    format!("{}?{}={}", contact_route, MESSAGE_PARAM, urlencoding::encode(message))
}

/// Derive the inquiry for a click on (row, column), or `None` if the cell
/// is not bookable
pub fn booking_inquiry(
    table: &ScheduleTable,
    row_index: usize,
    day: &str,
    contact_route: &str,
) -> Option<BookingInquiry> {
    if !is_bookable(table, row_index, day) {
        log::debug!("slot ({}, {}) is not bookable", row_index, day);
        return None;
    }

    // Start labels are echoed as written in the export
    let time_label = table.time_at(row_index).unwrap_or("");
    let start = SlotTime::parse(time_label);
    let start_label = start.map(|_| time_label.to_string());
    let end_label = start.map(|t| t.plus_one_hour().format());

    let message = compose_inquiry(day, start_label.as_deref(), end_label.as_deref());
    let route = inquiry_route(contact_route, &message);

    Some(BookingInquiry {
        day: day.to_string(),
        start: start_label,
        end: end_label,
        message,
        route,
    })
}
