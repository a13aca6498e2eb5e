/// Password Hashing and Verification
///
/// bcrypt with a tunable work factor. Stored hashes carry their own cost, so
/// raising the configured cost never breaks existing accounts.

use bcrypt::{hash, verify};

use crate::error::{AppError, ValidationError};

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Check a plaintext password against the hasher's input limits
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyField("password".to_string()));
    }

    // Longer inputs would be silently truncated by bcrypt
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::TooLong(
            "password".to_string(),
            MAX_PASSWORD_BYTES,
        ));
    }

    Ok(())
}

/// Hash a password using bcrypt with a fresh random salt
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - bcrypt work factor
///
/// # Errors
/// Returns error if:
/// - Password is empty or longer than 72 bytes
/// - bcrypt hashing fails (e.g. the OS random source is unavailable)
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    validate_password(password)?;

    hash(password, cost).map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
///
/// Returns `Ok(false)` on mismatch. Only a malformed hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    // Never accepted by hash_password, so it cannot match any stored hash
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    verify(password, hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::BCRYPT_MIN_COST as MIN_COST;

    #[test]
    fn test_hash_password() {
        let password = "secret123";
        let hash = hash_password(password, MIN_COST).expect("Failed to hash password");

        assert_ne!(password, hash);
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("secret123", MIN_COST).unwrap();
        let second = hash_password("secret123", MIN_COST).unwrap();

        assert_ne!(first, second);
        assert!(verify_password("secret123", &first).unwrap());
        assert!(verify_password("secret123", &second).unwrap());
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("secret123", MIN_COST).expect("Failed to hash password");

        let is_valid = verify_password("secret123", &hash).expect("Failed to verify password");
        assert!(is_valid);
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("secret123", MIN_COST).expect("Failed to hash password");

        let is_valid = verify_password("secret124", &hash).expect("Failed to verify password");
        assert!(!is_valid);
    }

    #[test]
    fn test_cost_is_embedded_in_hash() {
        let hash = hash_password("secret123", 5).unwrap();
        assert!(hash.starts_with("$2b$05$"));
    }

    #[test]
    fn test_empty_password_rejected() {
        match hash_password("", MIN_COST) {
            Err(AppError::Validation(ValidationError::EmptyField(field))) => {
                assert_eq!(field, "password")
            }
            other => panic!("Expected EmptyField, got {:?}", other),
        }
    }

    #[test]
    fn test_password_byte_limit() {
        let at_limit = "a".repeat(MAX_PASSWORD_BYTES);
        assert!(hash_password(&at_limit, MIN_COST).is_ok());

        let too_long = "a".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(
            hash_password(&too_long, MIN_COST),
            Err(AppError::Validation(ValidationError::TooLong(_, MAX_PASSWORD_BYTES)))
        ));
    }

    #[test]
    fn test_long_password_never_verifies() {
        let at_limit = "a".repeat(MAX_PASSWORD_BYTES);
        let hash = hash_password(&at_limit, MIN_COST).unwrap();

        // Would match under silent truncation
        let extended = format!("{}b", at_limit);
        assert!(!verify_password(&extended, &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("secret123", "not-a-bcrypt-hash").is_err());
    }
}
