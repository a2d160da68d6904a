//! # Validation Utilities
//!
//! Request field checks. Errors are user-facing messages.

/// Validate that a string is not empty or whitespace.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field_name))
    } else {
        Ok(())
    }
}

/// Validate email shape: a non-empty local part, a single `@`, and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), String> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err("invalid email format".to_string())
    }
}

/// Validate that the character count of `value` lies within `min..=max`.
pub fn validate_length_range(value: &str, min: usize, max: usize, field_name: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        Err(format!("{} should contain at least {} characters", field_name, min))
    } else if len > max {
        Err(format!("{} must not be greater than {} characters", field_name, max))
    } else {
        Ok(())
    }
}
