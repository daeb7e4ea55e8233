//! Configuration management
//!
//! TOML configuration with `${VAR}` environment substitution, `DOAJSYNC_*`
//! overrides and secrecy-wrapped credentials.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{ApplicationConfig, DoajApiConfig, DoajSyncConfig, LoggingConfig, RetryConfig};
pub use secret::{secret_string, SecretString, SecretValue};
