//! Range and format checks for loaded settings.
//!
//! Each `validate` returns the first problem found, keyed by its dotted path.

use crate::config::error::ConfigError;
use crate::config::settings::{
    AuthConfig, DatabaseConfig, LoggerSettings, ServerConfig, Settings, TokenAlgorithm,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const MIN_SECRET_LEN: usize = 32;

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Postgres URL, non-zero pool sizes, and `min <= max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required (TRIAD_DATABASE__URL).",
            ));
        }

        if !self.is_postgres_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Expected postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    fn is_postgres_url(&self) -> bool {
        ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

impl AuthConfig {
    /// The key material for the chosen algorithm must be present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.algorithm {
            TokenAlgorithm::HS256 => match self.secret.as_deref() {
                None | Some("") => Err(ConfigError::validation(
                    "auth.secret",
                    "HS256 requires a shared secret (TRIAD_AUTH__SECRET).",
                )),
                Some(secret) if secret.len() < MIN_SECRET_LEN => Err(ConfigError::validation(
                    "auth.secret",
                    format!("Secret should be at least {MIN_SECRET_LEN} characters."),
                )),
                Some(_) => Ok(()),
            },
            TokenAlgorithm::RS256 => match self.public_key_pem.as_deref() {
                Some(pem) if pem.contains("BEGIN") => Ok(()),
                _ => Err(ConfigError::validation(
                    "auth.public_key_pem",
                    "RS256 requires the identity provider's PEM-encoded public key.",
                )),
            },
        }
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one of logger.console and logger.file must be enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validates every section; auth key material is only required when the
    /// coffee-shop service is mounted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        if self.services.coffee {
            self.auth.validate()?;
        }
        self.logger.validate()?;
        Ok(())
    }
}
