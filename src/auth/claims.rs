/// JWT Claims structure
///
/// Identity fields embedded in an access token plus the standard
/// registered claims (RFC 7519). Never persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserView;

/// JWT Claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create new claims with user information
    ///
    /// # Arguments
    /// * `user_id` - User's UUID
    /// * `username` - User's display name
    /// * `email` - User's email address
    /// * `expiry_seconds` - Token expiration in seconds from now
    /// * `issuer` - Issuer identifier
    pub fn new(
        user_id: Uuid,
        username: String,
        email: String,
        expiry_seconds: i64,
        issuer: String,
    ) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            username,
            email,
            exp: now + expiry_seconds,
            iat: now,
            iss: issuer,
        }
    }

    /// Public view of the embedded identity; creation time is not a claim
    pub fn to_user_view(&self) -> UserView {
        UserView {
            id: self.sub.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_for(user_id: Uuid) -> Claims {
        Claims::new(
            user_id,
            "alice".to_string(),
            "a@x.com".to_string(),
            3600,
            "test".to_string(),
        )
    }

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = claims_for(user_id);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_user_view_has_no_created_at() {
        let user_id = Uuid::new_v4();
        let view = claims_for(user_id).to_user_view();

        assert_eq!(view.id, user_id.to_string());
        assert_eq!(view.username, "alice");
        assert_eq!(view.created_at, None);
    }
}
