use crate::types::{AppError, Result};

/// Checks a free-text field: non-empty, not purely numeric, and at least
/// `min_len` characters.
pub fn validate_field(name: &str, value: &str, min_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} can't be empty", name)));
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(format!("{} can't be numbers", name)));
    }
    if value.chars().count() < min_len {
        return Err(AppError::Validation(format!(
            "{} should be more than {} characters",
            name, min_len
        )));
    }
    Ok(())
}

/// Minimal shape check for an email address.
pub fn validate_email(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("email can't be empty".to_string()));
    }
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::Validation(
            "email address is not valid".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field_rejected() {
        let err = validate_field("username", "   ", 4).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_numeric_field_rejected() {
        let err = validate_field("username", "12345", 4).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_short_field_rejected() {
        let err = validate_field("password", "ab1", 6).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_valid_field_accepted() {
        assert!(validate_field("username", "rocky", 4).is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("rocky@test.com").is_ok());
        assert!(validate_email("rocky").is_err());
        assert!(validate_email("rocky@test").is_err());
        assert!(validate_email("@test.com").is_err());
        assert!(validate_email("").is_err());
    }
}
