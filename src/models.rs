/// Persisted records and the public user view
///
/// `User` and `RefreshToken` are owned by their stores; the core only holds
/// copies for the duration of one request.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Stored user account. The password hash never leaves the core.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the user store; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Stored refresh-token record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Build a record for a freshly generated token, expiring `lifetime_seconds` from now
    pub fn issue(user_id: Uuid, token: String, lifetime_seconds: i64) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            expires_at: created_at + Duration::seconds(lifetime_seconds),
            created_at,
        }
    }
}

/// Public user view returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Unix seconds; absent when the view is rebuilt from token claims
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<i64>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: Some(user.created_at.timestamp()),
        }
    }
}
