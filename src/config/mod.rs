//! Layered configuration for triad-rs.
//!
//! Priority, lowest first: `default.toml`, `{environment}.toml`, `local.toml`,
//! then `TRIAD_*` environment variables.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, AuthConfig, DatabaseConfig, LoggerSettings, ServerConfig, ServicesConfig,
    Settings, TokenAlgorithm,
};
