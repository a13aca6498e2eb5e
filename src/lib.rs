pub mod auth;
pub mod configuration;
pub mod context;
pub mod error;
pub mod models;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod validators;
