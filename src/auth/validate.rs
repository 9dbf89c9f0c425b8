use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Normalize and validate an email the way the registration form does.
pub(crate) fn check_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim().to_lowercase();
    if email.len() > 120 {
        return Err(ApiError::validation("email", "Email too long"));
    }
    if !is_valid_email(&email) {
        return Err(ApiError::validation("email", "Invalid email"));
    }
    Ok(email)
}

pub(crate) fn check_username(username: &str) -> Result<String, ApiError> {
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(ApiError::validation("username", "Username is required"));
    }
    if username.len() > 25 {
        return Err(ApiError::validation(
            "username",
            "Username must be at most 25 characters",
        ));
    }
    Ok(username)
}

pub(crate) fn check_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 8 || password.len() > 20 {
        return Err(ApiError::validation(
            "password",
            "Password must be 8-20 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@mail.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("alice@host"));
        assert!(!is_valid_email("a b@host.com"));
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(check_email("  Alice@Example.COM ").unwrap(), "alice@example.com");
    }

    #[test]
    fn username_bounds() {
        assert!(check_username("alice").is_ok());
        assert!(check_username("").is_err());
        assert!(check_username(&"x".repeat(26)).is_err());
    }

    #[test]
    fn password_bounds() {
        assert!(check_password("pw123456").is_ok());
        assert!(check_password("short").is_err());
        assert!(check_password(&"p".repeat(21)).is_err());
    }
}
