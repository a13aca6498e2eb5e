use std::net::TcpListener;
use std::sync::Arc;

use auth_service::auth::AuthService;
use auth_service::configuration::get_configuration;
use auth_service::startup::run;
use auth_service::store::{PgRefreshTokenStore, PgUserStore};
use auth_service::telemetry::init_telemetry;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    tracing::info!("Starting auth service");

    let configuration = match get_configuration() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    if let Err(e) = configuration.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Configuration error",
        ));
    }
    tracing::info!("Configuration loaded successfully");

    let pool = PgPoolOptions::new()
        .max_connections(configuration.database.max_connections)
        .acquire_timeout(configuration.application.request_timeout())
        .connect(&configuration.database.connection_string())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create connection pool: {}", e);
            std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Database connection error",
            )
        })?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, "Migration error")
        })?;

    tracing::info!("Database ready");

    let service = AuthService::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgRefreshTokenStore::new(pool)),
        configuration.jwt.clone(),
        configuration.hashing.clone(),
    )
    .map_err(|e| {
        tracing::error!("Failed to build auth service: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Auth service error")
    })?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    run(listener, service, configuration.application.request_timeout())?.await
}
