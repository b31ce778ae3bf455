use crate::utils::error::{DomainError, Result};

pub fn validate_non_blank(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must not be blank".to_string(),
        });
    }
    Ok(())
}

pub fn validate_length_between(field_name: &str, value: &str, min: usize, max: usize) -> Result<()> {
    // Counts characters, not bytes, so multi-byte names get the same limits.
    let length = value.chars().count();
    if length < min || length > max {
        return Err(DomainError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Length must be between {} and {} characters", min, max),
        });
    }
    Ok(())
}
