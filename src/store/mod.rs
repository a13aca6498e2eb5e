/// Store interfaces
///
/// The authentication core reaches persistence only through these traits.
/// Implementations are injected into `AuthService` at construction.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewUser, RefreshToken, User};

pub use memory::{InMemoryRefreshTokenStore, InMemoryUserStore};
pub use postgres::{PgRefreshTokenStore, PgUserStore};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by exact email; `Ok(None)` when no account exists
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Persist a new user, assigning its id and timestamps.
    ///
    /// Must fail with `AuthError::UserAlreadyExists` if the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;
}

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn insert(&self, token: &RefreshToken) -> Result<(), AppError>;
}
