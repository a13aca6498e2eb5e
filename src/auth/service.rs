/// Auth Orchestrator
///
/// Composes the hasher, token issuer/validator and the injected stores into
/// the Register, Login and ValidateToken operations. Holds no mutable state,
/// so concurrent calls are independent.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::{
    generate_access_token, generate_refresh_token, hash_password, validate_access_token,
    validate_password, verify_password,
};
use crate::configuration::{HashingSettings, JwtSettings};
use crate::context::RequestContext;
use crate::error::{AppError, AuthError, ValidationError};
use crate::models::{NewUser, RefreshToken, User, UserView};
use crate::store::{RefreshTokenStore, UserStore};
use crate::validators::{is_valid_email, is_valid_username, require};

/// Result of a successful Register or Login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserView,
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of ValidateToken; `user` is present only when `valid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    jwt: JwtSettings,
    hashing: HashingSettings,
    // Verified against when the email is unknown so both login failures cost the same
    dummy_hash: Arc<str>,
}

impl AuthService {
    /// Build the service. Computes one bcrypt hash at the configured cost.
    pub fn new(
        users: Arc<dyn UserStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        jwt: JwtSettings,
        hashing: HashingSettings,
    ) -> Result<Self, AppError> {
        jwt.validate()?;
        hashing.validate()?;
        let dummy_hash = hash_password(&generate_refresh_token(), hashing.cost)?;

        Ok(Self {
            users,
            refresh_tokens,
            jwt,
            hashing,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Create an account and issue its first token pair.
    ///
    /// Not idempotent: a second call with the same email fails with
    /// `UserAlreadyExists` and creates nothing.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError> {
        let username = is_valid_username(username)?;
        let email = is_valid_email(email)?;
        validate_password(password)?;

        let existing = ctx.run("find_user", self.users.find_by_email(&email)).await?;
        if existing.is_some() {
            tracing::info!(request_id = %ctx.request_id, "Registration rejected: email taken");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.hash(ctx, password).await?;

        let user = ctx
            .run(
                "insert_user",
                self.users.insert(NewUser {
                    username,
                    email,
                    password_hash,
                }),
            )
            .await?;

        let response = self.issue_tokens(ctx, &user).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %user.id,
            "User registered successfully"
        );

        Ok(response)
    }

    /// Verify credentials and issue a new token pair.
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError> {
        let email = require("email", email)?;
        if password.is_empty() {
            return Err(ValidationError::EmptyField("password".to_string()).into());
        }

        let user = ctx.run("find_user", self.users.find_by_email(&email)).await?;

        let user = match user {
            Some(user) => {
                if !self.verify(ctx, password, &user.password_hash).await? {
                    return Err(AuthError::InvalidCredentials.into());
                }
                user
            }
            None => {
                self.verify(ctx, password, &self.dummy_hash).await?;
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let response = self.issue_tokens(ctx, &user).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %user.id,
            "User logged in successfully"
        );

        Ok(response)
    }

    /// Check an access token. Never fails; invalid input yields `valid: false`.
    pub fn validate_token(&self, token: &str) -> ValidateTokenResponse {
        match validate_access_token(token, &self.jwt) {
            Ok(claims) => ValidateTokenResponse {
                valid: true,
                user: Some(claims.to_user_view()),
            },
            Err(_) => ValidateTokenResponse {
                valid: false,
                user: None,
            },
        }
    }

    async fn issue_tokens(&self, ctx: &RequestContext, user: &User) -> Result<AuthResponse, AppError> {
        let access_token = generate_access_token(&user.id, &user.username, &user.email, &self.jwt)?;
        let refresh_token = generate_refresh_token();

        let record = RefreshToken::issue(user.id, refresh_token.clone(), self.jwt.refresh_token_expiry);

        // Best-effort: the token pair is still returned if this write fails
        if let Err(e) = ctx
            .run("insert_refresh_token", self.refresh_tokens.insert(&record))
            .await
        {
            tracing::warn!(
                request_id = %ctx.request_id,
                operation = ctx.operation,
                user_id = %user.id,
                error = %e,
                "Failed to persist refresh token"
            );
        }

        Ok(AuthResponse {
            user: UserView::from(user),
            access_token,
            refresh_token,
        })
    }

    async fn hash(&self, ctx: &RequestContext, password: &str) -> Result<String, AppError> {
        let password = password.to_string();
        let cost = self.hashing.cost;

        ctx.run("hash_password", async move {
            tokio::task::spawn_blocking(move || hash_password(&password, cost))
                .await
                .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        })
        .await
    }

    async fn verify(&self, ctx: &RequestContext, password: &str, hash: &str) -> Result<bool, AppError> {
        let password = password.to_string();
        let hash = hash.to_string();

        ctx.run("verify_password", async move {
            tokio::task::spawn_blocking(move || verify_password(&password, &hash))
                .await
                .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
        })
        .await
    }
}
