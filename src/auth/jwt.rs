/// JWT Token Generation and Validation
///
/// Access tokens are HS256-signed and self-contained: validation needs only
/// the shared secret, never a store lookup.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};

/// Generate a new access token for a user
///
/// # Arguments
/// * `user_id` - User's UUID
/// * `username` - User's display name
/// * `email` - User's email address
/// * `config` - JWT configuration settings
///
/// # Errors
/// Returns error if token signing fails
pub fn generate_access_token(
    user_id: &Uuid,
    username: &str,
    email: &str,
    config: &JwtSettings,
) -> Result<String, AppError> {
    let claims = Claims::new(
        *user_id,
        username.to_string(),
        email.to_string(),
        config.access_token_expiry,
        config.issuer.clone(),
    );

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Validate and extract claims from an access token
///
/// Every failure (bad signature, malformed token, expired, wrong issuer)
/// yields the same `AuthError::TokenInvalid`; the reason is only logged.
pub fn validate_access_token(token: &str, config: &JwtSettings) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_required_spec_claims(&["exp", "iat", "sub", "iss"]);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(reason = %e, "Access token rejected");
        AuthError::TokenInvalid
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_config() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
            issuer: "test".to_string(),
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = get_test_config();
        let user_id = Uuid::new_v4();

        let token = generate_access_token(&user_id, "alice", "a@x.com", &config)
            .expect("Failed to generate token");
        let claims = validate_access_token(&token, &config).expect("Failed to validate token");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.iss, "test");
        assert_eq!(claims.exp - claims.iat, config.access_token_expiry);
    }

    #[test]
    fn test_invalid_token() {
        let config = get_test_config();
        let result = validate_access_token("invalid.token.here", &config);

        assert_eq!(result, Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_tampered_signature() {
        let config = get_test_config();
        let token = generate_access_token(&Uuid::new_v4(), "alice", "a@x.com", &config)
            .expect("Failed to generate token");

        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { "B" } else { "A" };
        let tampered = format!("{}.{}{}", unsigned, flipped, &signature[1..]);

        assert_eq!(
            validate_access_token(&tampered, &config),
            Err(AuthError::TokenInvalid)
        );
    }

    #[test]
    fn test_wrong_secret() {
        let config = get_test_config();
        let claims = Claims::new(
            Uuid::new_v4(),
            "alice".to_string(),
            "a@x.com".to_string(),
            3600,
            "test".to_string(),
        );
        let token = sign(&claims, "another-secret-key-at-least-32-characters");

        assert_eq!(
            validate_access_token(&token, &config),
            Err(AuthError::TokenInvalid)
        );
    }

    #[test]
    fn test_expired_token() {
        let config = get_test_config();
        let mut claims = Claims::new(
            Uuid::new_v4(),
            "alice".to_string(),
            "a@x.com".to_string(),
            3600,
            "test".to_string(),
        );
        claims.iat -= 7200;
        claims.exp = claims.iat + 3600;
        let token = sign(&claims, &config.secret);

        assert_eq!(
            validate_access_token(&token, &config),
            Err(AuthError::TokenInvalid)
        );
    }

    #[test]
    fn test_wrong_issuer() {
        let mut config = get_test_config();
        let token = generate_access_token(&Uuid::new_v4(), "alice", "a@x.com", &config)
            .expect("Failed to generate token");

        config.issuer = "wrong-issuer".to_string();
        assert_eq!(
            validate_access_token(&token, &config),
            Err(AuthError::TokenInvalid)
        );
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let config = get_test_config();
        let malformed = validate_access_token("garbage", &config).unwrap_err();
        let empty = validate_access_token("", &config).unwrap_err();

        assert_eq!(malformed, empty);
        assert_eq!(malformed.to_string(), "Invalid token");
    }
}
