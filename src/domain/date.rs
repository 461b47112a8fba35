use chrono::{Local, NaiveDate};

use super::ValidationError;

/// Canonical date layout for expenses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_FORMAT_ERROR: &str = "Date format should be YYYY-MM-DD";

/// Today's local calendar date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Parse an expense date.
///
/// Blank input means "today". Anything else must already be a valid
/// `YYYY-MM-DD` date and is returned as given (trimmed), so an accepted date
/// string round-trips unchanged.
pub fn parse_date(input: &str) -> Result<String, ValidationError> {
    parse_date_on(input, Local::now().date_naive())
}

/// Same as [`parse_date`] with an explicit date to substitute for blank input.
pub fn parse_date_on(input: &str, today: NaiveDate) -> Result<String, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today.format(DATE_FORMAT).to_string());
    }

    if !has_date_shape(input) || NaiveDate::parse_from_str(input, DATE_FORMAT).is_err() {
        return Err(ValidationError::new(DATE_FORMAT_ERROR));
    }

    Ok(input.to_string())
}

/// Checks the `DDDD-DD-DD` layout; chrono alone accepts single-digit months
/// and days.
fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
