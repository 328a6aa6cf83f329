//! Shared field validation helpers.

use crate::error::CoreError;

/// Validate that a numeric field is not negative.
pub fn validate_non_negative(value: f64, name: &str) -> Result<(), CoreError> {
    if value < 0.0 || value.is_nan() {
        return Err(CoreError::Validation(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Validate that a required text field is present and not blank.
pub fn validate_required(value: &str, name: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} is required")));
    }
    Ok(())
}
