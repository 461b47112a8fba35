use super::ValidationError;

/// Amounts are plain floating point values; there is no currency handling.
pub type Amount = f64;

/// Format an amount as a human-readable currency string.
/// Example: 1234.5 -> "$1234.50", -12.345 -> "-$12.35"
pub fn format_amount(amount: Amount) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${:.2}", sign, amount.abs())
}

/// Parse user-entered text into a non-negative amount.
/// `field_name` is used in the error message, e.g. "Amount must be a number."
pub fn parse_amount(input: &str, field_name: &str) -> Result<Amount, ValidationError> {
    let value: Amount = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(format!("{} must be a number.", field_name)))?;

    // "nan" and "inf" parse as floats but are not amounts
    if !value.is_finite() {
        return Err(ValidationError::new(format!(
            "{} must be a number.",
            field_name
        )));
    }
    if value < 0.0 {
        return Err(ValidationError::new(format!(
            "{} can't be negative.",
            field_name
        )));
    }

    Ok(value)
}

/// Returns true when `amount` may be stored on a record.
pub fn is_valid_amount(amount: Amount) -> bool {
    amount.is_finite() && amount >= 0.0
}
