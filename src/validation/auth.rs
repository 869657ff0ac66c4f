use crate::error::{AppError, Result};

/// Validates the email a session token is issued for.
///
/// # Arguments
///
/// * `email` - The email to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the email is acceptable.
pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("Email cannot be empty".to_string()));
    }

    if email.len() > 255 {
        return Err(AppError::Validation(
            "Email must be at most 255 characters".to_string(),
        ));
    }

    if !email.contains('@') {
        return Err(AppError::Validation(
            "Email must contain an @".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_plain_address() {
        assert!(validate_email("a@b.com").is_ok());
    }

    #[test]
    fn rejects_empty_and_malformed_addresses() {
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
    }

    #[test]
    fn rejects_oversized_addresses() {
        let long = format!("{}@b.com", "a".repeat(300));
        assert!(validate_email(&long).is_err());
    }
}
