mod auth;
mod health_check;

pub use auth::{login, register, validate_token};
pub use health_check::health_check;
