// Output formatting utilities

use crate::grid::{BookingInquiry, ColorMap, GridCell, ScheduleGrid, Span};
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

// ANSI foreground colors used for text on top of a fill
const ANSI_FG_BLACK: &str = "\x1b[30m";
const ANSI_FG_WHITE: &str = "\x1b[37m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

/// Shown under every rendering of the schedule
pub const MINIMUM_DURATION_NOTICE: &str = "All reservations require a minimum duration of one hour.";

/// Marker printed in empty cells that start a bookable hour
const OPEN_SLOT_MARKER: &str = "+";

/// Map a color token to its ANSI background code
fn color_token_to_bg(token: &str) -> Option<&'static str> {
    match token {
        "black" => Some("\x1b[40m"),
        "red" => Some("\x1b[41m"),
        "green" => Some("\x1b[42m"),
        "yellow" => Some("\x1b[43m"),
        "blue" => Some("\x1b[44m"),
        "magenta" => Some("\x1b[45m"),
        "cyan" => Some("\x1b[46m"),
        "white" => Some("\x1b[47m"),
        "bright_black" => Some("\x1b[100m"),
        "bright_red" => Some("\x1b[101m"),
        "bright_green" => Some("\x1b[102m"),
        "bright_yellow" => Some("\x1b[103m"),
        "bright_blue" => Some("\x1b[104m"),
        "bright_magenta" => Some("\x1b[105m"),
        "bright_cyan" => Some("\x1b[106m"),
        "bright_white" => Some("\x1b[107m"),
        _ => None,
    }
}

/// Approximate RGB for a color token, as typical terminals render it
///
/// Actual colors vary between terminals and color schemes; these values
/// are only used to pick black or white text on top.
fn color_token_to_rgb(token: &str) -> Option<(u8, u8, u8)> {
    match token {
        "black" => Some((0, 0, 0)),
        "red" => Some((170, 0, 0)),
        "green" => Some((0, 200, 0)),
        "yellow" => Some((200, 200, 0)),
        "blue" => Some((0, 0, 200)),
        "magenta" => Some((200, 0, 200)),
        "cyan" => Some((0, 200, 200)),
        "white" => Some((229, 229, 229)),
        "bright_black" => Some((128, 128, 128)),
        "bright_red" => Some((255, 85, 85)),
        "bright_green" => Some((85, 255, 85)),
        "bright_yellow" => Some((255, 255, 85)),
        "bright_blue" => Some((85, 85, 255)),
        "bright_magenta" => Some((255, 85, 255)),
        "bright_cyan" => Some((85, 255, 255)),
        "bright_white" => Some((255, 255, 255)),
        _ => None,
    }
}

/// Relative luminance (WCAG), 0.0 = black, 1.0 = white
fn calculate_relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn linear(channel: u8) -> f64 {
        let c = channel as f64 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// Black text on light fills, white on dark ones
fn get_contrasting_fg_for_token(token: &str) -> &'static str {
    match color_token_to_rgb(token) {
        Some((r, g, b)) if calculate_relative_luminance(r, g, b) <= 0.5 => ANSI_FG_WHITE,
        _ => ANSI_FG_BLACK,
    }
}

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate, with fallback to the COLUMNS environment
/// variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Apply bold formatting if in TTY mode
fn bold_if_tty(text: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

/// Options for terminal rendering of the schedule
#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    pub use_color: bool,
    pub width: usize,
}

impl TableOptions {
    pub fn detect() -> Self {
        Self {
            use_color: is_tty(),
            width: get_terminal_width(),
        }
    }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Truncate to `width` characters, marking the cut with an ellipsis
fn fit(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width <= 1 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize) -> String {
    let fitted = fit(text, width);
    let padding = width.saturating_sub(display_width(&fitted));
    format!("{}{}", fitted, " ".repeat(padding))
}

/// Column widths: (row-number, time, day columns), shrunk to the terminal
fn column_widths(grid: &ScheduleGrid, total_width: usize) -> (usize, usize, Vec<usize>) {
    let index_width = display_width(&grid.rows.len().saturating_sub(1).to_string()).max(1);
    let time_width = grid
        .rows
        .iter()
        .map(|r| display_width(&r.time))
        .chain(std::iter::once(display_width(&grid.time_column)))
        .max()
        .unwrap_or(0);

    let mut day_widths: Vec<usize> = grid
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            grid.rows
                .iter()
                .map(|r| display_width(r.cells[i].value.trim()))
                .chain(std::iter::once(display_width(column)))
                .max()
                .unwrap_or(1)
                .max(1)
        })
        .collect();

    // Two spaces between columns
    let fixed = index_width + 2 + time_width + 2;
    let gaps = day_widths.len().saturating_sub(1) * 2;
    let needed: usize = fixed + gaps + day_widths.iter().sum::<usize>();
    if needed > total_width && !day_widths.is_empty() {
        let available = total_width.saturating_sub(fixed + gaps);
        let cap = (available / day_widths.len()).max(6);
        for w in day_widths.iter_mut() {
            *w = (*w).min(cap);
        }
    }

    (index_width, time_width, day_widths)
}

fn format_cell(cell: &GridCell, width: usize, use_color: bool) -> String {
    let text = match cell.span {
        Span::Covered => "",
        _ if cell.bookable => OPEN_SLOT_MARKER,
        _ => cell.value.trim(),
    };
    let padded = pad(text, width);

    if !use_color {
        return padded;
    }
    if cell.bookable {
        return format!("{}{}{}", ANSI_FG_BRIGHT_BLACK, padded, ANSI_RESET);
    }
    // Covered cells keep the fill of the cell above so the hour reads as one block
    match color_token_to_bg(&cell.color) {
        Some(bg) => format!("{}{}{}{}", bg, get_contrasting_fg_for_token(&cell.color), padded, ANSI_RESET),
        None => padded,
    }
}

/// Render the schedule grid as a terminal table
pub fn format_schedule_table(grid: &ScheduleGrid, options: TableOptions) -> String {
    let mut out = String::new();
    if grid.is_empty() {
        out.push_str("No classes scheduled.\n");
        return out;
    }

    let (index_width, time_width, day_widths) = column_widths(grid, options.width);

    let mut header = format!("{}  {}", pad("#", index_width), pad(&grid.time_column, time_width));
    for (column, width) in grid.columns.iter().zip(&day_widths) {
        header.push_str("  ");
        header.push_str(&pad(column, *width));
    }
    out.push_str(&bold_if_tty(header.trim_end(), options.use_color));
    out.push('\n');

    for row in &grid.rows {
        let mut line = format!("{}  {}", pad(&row.index.to_string(), index_width), pad(&row.time, time_width));
        for (cell, width) in row.cells.iter().zip(&day_widths) {
            line.push_str("  ");
            line.push_str(&format_cell(cell, *width, options.use_color));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push('\n');
    if grid.rows.iter().any(|r| r.cells.iter().any(|c| c.bookable)) {
        out.push_str(&format!(
            "{} open hour: book with `studiogrid book <day> --row <#>`\n",
            OPEN_SLOT_MARKER
        ));
    }
    out.push_str(MINIMUM_DURATION_NOTICE);
    out.push('\n');
    out
}

const OTHER_LABEL: &str = "(other)";

/// Render the effective color mapping
pub fn format_color_legend(colors: &ColorMap, use_color: bool) -> String {
    let mut out = String::new();
    let label_width = colors
        .entries()
        .map(|(label, _)| display_width(label))
        .chain([display_width("Class"), display_width(OTHER_LABEL)])
        .max()
        .unwrap_or(7);

    out.push_str(&bold_if_tty(&format!("{}  Color", pad("Class", label_width)), use_color));
    out.push('\n');
    for (label, token) in colors.entries() {
        let swatch = match (use_color, color_token_to_bg(token)) {
            (true, Some(bg)) => format!("{}{}{}{} ", bg, get_contrasting_fg_for_token(token), "  ", ANSI_RESET),
            _ => String::new(),
        };
        out.push_str(&format!("{}  {}{}\n", pad(label, label_width), swatch, token));
    }
    out.push_str(&format!("{}  {}\n", pad(OTHER_LABEL, label_width), colors.default_token()));
    out
}

/// Render a booking inquiry
pub fn format_inquiry(inquiry: &BookingInquiry) -> String {
    format!("Message: {}\nRoute:   {}\n", inquiry.message, inquiry.route)
}
