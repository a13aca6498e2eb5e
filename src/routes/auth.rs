/// Authentication Routes
///
/// Thin JSON adapter over `AuthService`: Register, Login and ValidateToken.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::AuthService;
use crate::context::RequestContext;
use crate::error::{RequestError, REQUEST_ID_HEADER};
use crate::startup::RequestTimeout;

/// User registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token validation request. A missing token validates as an empty one.
#[derive(Deserialize)]
pub struct ValidateTokenRequest {
    #[serde(default)]
    pub token: String,
}

/// POST /auth/register
///
/// # Errors
/// - 400: Validation errors (empty field, invalid email, password over 72 bytes)
/// - 409: Email already registered
/// - 500/503/504: Store, hashing or signing failure, or deadline exceeded
pub async fn register(
    form: web::Json<RegisterRequest>,
    service: web::Data<AuthService>,
    timeout: web::Data<RequestTimeout>,
) -> Result<HttpResponse, RequestError> {
    let ctx = RequestContext::new("register", timeout.0);

    let response = service
        .register(&ctx, &form.username, &form.email, &form.password)
        .await
        .map_err(|e| e.in_request(&ctx.request_id))?;

    Ok(HttpResponse::Created()
        .insert_header((REQUEST_ID_HEADER, ctx.request_id.as_str()))
        .json(response))
}

/// POST /auth/login
///
/// # Errors
/// - 400: Empty email or password
/// - 401: Invalid credentials (same body for unknown email and wrong password)
/// - 500/503/504: Store failure or deadline exceeded
pub async fn login(
    form: web::Json<LoginRequest>,
    service: web::Data<AuthService>,
    timeout: web::Data<RequestTimeout>,
) -> Result<HttpResponse, RequestError> {
    let ctx = RequestContext::new("login", timeout.0);

    let response = service
        .login(&ctx, &form.email, &form.password)
        .await
        .map_err(|e| e.in_request(&ctx.request_id))?;

    Ok(HttpResponse::Ok()
        .insert_header((REQUEST_ID_HEADER, ctx.request_id.as_str()))
        .json(response))
}

/// POST /auth/validate
///
/// Always 200. Callers branch on `valid`, never on the status code.
pub async fn validate_token(
    form: web::Json<ValidateTokenRequest>,
    service: web::Data<AuthService>,
) -> HttpResponse {
    HttpResponse::Ok().json(service.validate_token(&form.token))
}
