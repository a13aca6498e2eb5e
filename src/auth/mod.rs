/// Authentication module
///
/// Password hashing, access-token issuance/validation, refresh-token
/// generation, and the orchestrating `AuthService`.

mod claims;
mod jwt;
mod password;
mod refresh_token;
mod service;

pub use claims::Claims;
pub use jwt::generate_access_token;
pub use jwt::validate_access_token;
pub use password::hash_password;
pub use password::validate_password;
pub use password::verify_password;
pub use password::MAX_PASSWORD_BYTES;
pub use refresh_token::generate_refresh_token;
pub use service::{AuthResponse, AuthService, ValidateTokenResponse};
