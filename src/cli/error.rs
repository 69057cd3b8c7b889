// Error handling utilities for consistent error messages and exit codes

use std::process;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, unbookable slots, rate limits, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a schedule row index against the number of rows
pub fn validate_row_index(index: usize, row_count: usize) -> Result<usize, String> {
    if row_count == 0 {
        return Err("The schedule has no rows.".to_string());
    }
    if index < row_count {
        Ok(index)
    } else {
        Err(format!(
            "Invalid row: {}. Rows are numbered 0 to {}.",
            index,
            row_count - 1
        ))
    }
}
