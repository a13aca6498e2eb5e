use std::time::Duration;

use crate::error::ConfigError;

const MIN_SECRET_LENGTH: usize = 32;

/// Mirrors bcrypt's cost bounds, which the bcrypt crate does not export.
pub const BCRYPT_MIN_COST: u32 = 4;
pub const BCRYPT_MAX_COST: u32 = 31;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
    #[serde(default)]
    pub hashing: HashingSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Overall deadline for a single Register/Login/ValidateToken call
    pub request_timeout_ms: u64,
}

impl ApplicationSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }
}

/// JWT authentication settings
#[derive(serde::Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_expiry: i64, // seconds (e.g., 900 for 15 minutes)
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64, // seconds, 7 days unless overridden
    pub issuer: String,
}

fn default_refresh_token_expiry() -> i64 {
    7 * 24 * 60 * 60
}

/// Password hashing settings
#[derive(serde::Deserialize, Clone)]
pub struct HashingSettings {
    /// bcrypt work factor
    pub cost: u32,
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl JwtSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::MissingRequired("jwt.secret".to_string()));
        }
        if self.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::InvalidValue(format!(
                "jwt.secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }
        if self.access_token_expiry <= 0 || self.refresh_token_expiry <= 0 {
            return Err(ConfigError::InvalidValue(
                "token lifetimes must be positive".to_string(),
            ));
        }
        // Access tokens must always expire before the refresh token that accompanies them
        if self.access_token_expiry >= self.refresh_token_expiry {
            return Err(ConfigError::InvalidValue(
                "jwt.access_token_expiry must be shorter than jwt.refresh_token_expiry".to_string(),
            ));
        }
        Ok(())
    }
}

impl HashingSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&self.cost) {
            return Err(ConfigError::InvalidValue(format!(
                "hashing.cost must be between {} and {}",
                BCRYPT_MIN_COST,
                BCRYPT_MAX_COST
            )));
        }
        Ok(())
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        self.hashing.validate()?;
        if self.application.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "application.request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load settings from `configuration.yaml` (optional), then `APP__`-prefixed
/// environment variables, e.g. `APP__JWT__SECRET`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
