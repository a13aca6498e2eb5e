/// Refresh Token Generation
///
/// Refresh tokens are opaque lookup keys, not self-describing tokens:
/// 64 characters drawn from the alphanumeric alphabet by the thread-local
/// CSPRNG, roughly 380 bits of entropy.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

pub const REFRESH_TOKEN_LENGTH: usize = 64;

/// Generate a new cryptographically secure refresh token
pub fn generate_refresh_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
