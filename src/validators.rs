/// Input validators for account fields
/// - Empty-field and length checks
/// - Email format check (RFC 5322 simplified)
/// - Control-character rejection for usernames

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321
const MAX_USERNAME_LENGTH: usize = 64;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email regex is valid");
}

/// Trim a required field, rejecting it when nothing is left
pub fn require(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Validates an email address for registration
pub fn is_valid_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = require("email", email)?;

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong("email".to_string(), MAX_EMAIL_LENGTH));
    }

    if !EMAIL_REGEX.is_match(&trimmed) {
        return Err(ValidationError::InvalidFormat("email".to_string()));
    }

    // Local part is limited to 64 octets
    if let Some(at_pos) = trimmed.find('@') {
        if at_pos > 64 {
            return Err(ValidationError::InvalidFormat("email".to_string()));
        }
    }

    Ok(trimmed)
}

/// Validates a username
pub fn is_valid_username(username: &str) -> Result<String, ValidationError> {
    let trimmed = require("username", username)?;

    if trimmed.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong(
            "username".to_string(),
            MAX_USERNAME_LENGTH,
        ));
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidFormat("username".to_string()));
    }

    Ok(trimmed)
}
