use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{RefreshTokenStore, UserStore};
use crate::error::{AppError, AuthError, DatabaseError};
use crate::models::{NewUser, RefreshToken, User};

fn poisoned() -> AppError {
    AppError::Internal("store lock poisoned".to_string())
}

/// User store backed by a map keyed on email
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().map_err(|_| poisoned())?;
        Ok(users.get(email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().map_err(|_| poisoned())?;
        if users.contains_key(&user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let now = Utc::now();
        let record = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.email.clone(), record.clone());
        Ok(record)
    }
}

/// Refresh-token store backed by a map keyed on the token string
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records owned by `user_id`, oldest first
    pub fn tokens_for(&self, user_id: Uuid) -> Vec<RefreshToken> {
        let mut owned: Vec<RefreshToken> = self
            .tokens
            .lock()
            .map(|tokens| {
                tokens
                    .values()
                    .filter(|t| t.user_id == user_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        owned.sort_by_key(|t| t.created_at);
        owned
    }

    pub fn find(&self, token: &str) -> Option<RefreshToken> {
        self.tokens.lock().ok()?.get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.tokens.lock().map(|tokens| tokens.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn insert(&self, token: &RefreshToken) -> Result<(), AppError> {
        let mut tokens = self.tokens.lock().map_err(|_| poisoned())?;
        if tokens.contains_key(&token.token) {
            return Err(DatabaseError::UniqueConstraintViolation(
                "refresh_tokens_token_key".to_string(),
            )
            .into());
        }
        tokens.insert(token.token.clone(), token.clone());
        Ok(())
    }
}
