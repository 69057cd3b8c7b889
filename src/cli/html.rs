//! HTML rendering of the schedule
//!
//! Produces a self-contained page: merged cells become `rowspan="2"`, filled
//! cells carry a `slot-<token>` class, and open hours link to the contact
//! route with a prefilled inquiry.

use crate::cli::output::MINIMUM_DURATION_NOTICE;
use crate::grid::{booking_inquiry, GridCell, ScheduleGrid, Span};
use crate::models::ScheduleTable;

/// Render the grid as a complete HTML document
pub fn render_html_schedule(grid: &ScheduleGrid, table: &ScheduleTable, contact_route: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Class Schedule</title>
    <style>{css}</style>
</head>
<body>
    <main class="schedule">
        <h1>Class Schedule</h1>
        {body}
        <p class="notice">{notice}</p>
    </main>
</body>
</html>
"#,
        css = inline_css(),
        body = render_table(grid, table, contact_route),
        notice = escape_html(MINIMUM_DURATION_NOTICE),
    )
}

fn render_table(grid: &ScheduleGrid, table: &ScheduleTable, contact_route: &str) -> String {
    if grid.is_empty() {
        return r#"<p class="empty">No classes scheduled.</p>"#.to_string();
    }

    let mut html = String::from("<table>\n<thead><tr>");
    html.push_str(&format!("<th>{}</th>", escape_html(&grid.time_column)));
    for column in &grid.columns {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &grid.rows {
        html.push_str(&format!("<tr><th scope=\"row\">{}</th>", escape_html(&row.time)));
        for cell in &row.cells {
            if let Some(td) = render_cell(cell, row.index, table, contact_route) {
                html.push_str(&td);
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

fn render_cell(cell: &GridCell, row_index: usize, table: &ScheduleTable, contact_route: &str) -> Option<String> {
    match cell.span {
        Span::Covered => None,
        _ if cell.bookable => {
            let inquiry = booking_inquiry(table, row_index, &cell.column, contact_route)?;
            Some(format!(
                r#"<td class="slot-open"><a href="{}" title="{}">Book</a></td>"#,
                escape_html(&inquiry.route),
                escape_html(&inquiry.message)
            ))
        }
        span => {
            let rowspan = if span == Span::Double { r#" rowspan="2""# } else { "" };
            Some(format!(
                r#"<td class="slot-{}"{}>{}</td>"#,
                escape_html(&cell.color),
                rowspan,
                escape_html(cell.value.trim())
            ))
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: center; }
thead th { background: #f4f4f4; }
.notice { margin-top: 1rem; font-style: italic; }
.slot-open a { color: #888; text-decoration: none; }
.slot-open:hover { background: #f0f8ff; }
.slot-neutral { background: #fafafa; }
.slot-black, .slot-bright_black { background: #9e9e9e; }
.slot-red { background: #ef9a9a; } .slot-bright_red { background: #ffcdd2; }
.slot-green { background: #a5d6a7; } .slot-bright_green { background: #c8e6c9; }
.slot-yellow { background: #fff59d; } .slot-bright_yellow { background: #fff9c4; }
.slot-blue { background: #90caf9; } .slot-bright_blue { background: #bbdefb; }
.slot-magenta { background: #ce93d8; } .slot-bright_magenta { background: #e1bee7; }
.slot-cyan { background: #80deea; } .slot-bright_cyan { background: #b2ebf2; }
.slot-white, .slot-bright_white { background: #ffffff; }
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ColorMap;
    use crate::models::Row;

    fn table() -> ScheduleTable {
        ScheduleTable::new(
            vec!["Time".into(), "Monday".into(), "Tuesday".into()],
            "Time",
            vec![
                Row::from_pairs([("Time", "9:00"), ("Monday", "Hip Hop"), ("Tuesday", "")]),
                Row::from_pairs([("Time", "9:30"), ("Monday", "hip hop"), ("Tuesday", "")]),
            ],
        )
    }

    #[test]
    fn test_merged_cell_has_rowspan() {
        let t = table();
        let html = render_html_schedule(&ScheduleGrid::build(&t, &ColorMap::builtin()), &t, "/contact");
        assert!(html.contains(r#"<td class="slot-yellow" rowspan="2">Hip Hop</td>"#));
        assert!(!html.contains(">hip hop<"));
        assert!(html.contains(MINIMUM_DURATION_NOTICE));
    }

    #[test]
    fn test_open_slot_links_to_contact() {
        let t = table();
        let html = render_html_schedule(&ScheduleGrid::build(&t, &ColorMap::builtin()), &t, "/contact");
        assert!(html.contains(r#"href="/contact?message=I%27d%20like%20to%20reserve"#));
        assert_eq!(html.matches("slot-open\"><a").count(), 1);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn test_empty_schedule() {
        let t = ScheduleTable::default();
        let html = render_html_schedule(&ScheduleGrid::build(&t, &ColorMap::builtin()), &t, "/contact");
        assert!(html.contains("No classes scheduled."));
        assert!(!html.contains("<table>"));
    }
}
