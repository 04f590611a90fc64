//! Configuration settings structures for triad-rs
//!
//! Every section deserializes with serde defaults, so a partial TOML file (or
//! an empty one) still yields a complete `Settings`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "triad-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_keep_alive_timeout() -> u64 {
    75
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_leeway() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/triad.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application / Server / Database
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keep_alive_timeout")]
    pub keep_alive_timeout: u64,
}

impl ServerConfig {
    /// The listen address as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            keep_alive_timeout: default_keep_alive_timeout(),
        }
    }
}

/// Postgres pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Apply pending migrations before the server starts listening
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Bearer token verification (coffee shop)
// ============================================================================

/// Signature algorithm accepted on bearer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TokenAlgorithm {
    #[default]
    HS256,
    RS256,
}

/// How bearer tokens are verified.
///
/// HS256 verifies with `secret`; RS256 verifies with `public_key_pem`, the
/// identity provider's signing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub algorithm: TokenAlgorithm,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_pem: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    /// Clock skew tolerated on `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            algorithm: TokenAlgorithm::default(),
            secret: None,
            public_key_pem: None,
            issuer: None,
            audience: None,
            leeway: default_leeway(),
        }
    }
}

// ============================================================================
// Mounted services
// ============================================================================

/// Which of the three services the router mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_true")]
    pub booking: bool,

    #[serde(default = "default_true")]
    pub trivia: bool,

    #[serde(default = "default_true")]
    pub coffee: bool,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            booking: true,
            trivia: true,
            coffee: true,
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// "full", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: true,
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Converts the file representation into the runtime `LoggerConfig`.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format)
            .map_err(|e| ConfigError::validation("logger.file", e.to_string()))
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings, as loaded from TOML and `TRIAD_*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub services: ServicesConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![Just("127.0.0.1".to_string()), Just("0.0.0.0".to_string())],
            1u16..=65535u16,
            1u64..=300u64,
            1u64..=300u64,
        )
            .prop_map(|(host, port, request_timeout, keep_alive_timeout)| ServerConfig {
                host,
                port,
                request_timeout,
                keep_alive_timeout,
            })
    }

    fn arb_database_config() -> impl Strategy<Value = DatabaseConfig> {
        (
            prop_oneof![
                Just("postgres://localhost/triad".to_string()),
                Just("postgresql://user:pass@db:5432/triad".to_string()),
            ],
            1u32..=100u32,
            1u32..=10u32,
            1u64..=120u64,
            any::<bool>(),
        )
            .prop_map(|(url, max, min, connection_timeout, auto_migrate)| DatabaseConfig {
                url,
                max_connections: max,
                min_connections: min.min(max),
                connection_timeout,
                auto_migrate,
            })
    }

    fn arb_auth_config() -> impl Strategy<Value = AuthConfig> {
        (
            prop_oneof![Just(TokenAlgorithm::HS256), Just(TokenAlgorithm::RS256)],
            proptest::option::of("[a-zA-Z0-9]{32,48}"),
            proptest::option::of("https://[a-z]{3,10}\\.example\\.com/"),
            proptest::option::of("[a-z]{3,12}"),
            0u64..=300u64,
        )
            .prop_map(|(algorithm, secret, issuer, audience, leeway)| AuthConfig {
                algorithm,
                secret,
                public_key_pem: None,
                issuer,
                audience,
                leeway,
            })
    }

    fn arb_logger_settings() -> impl Strategy<Value = LoggerSettings> {
        (
            prop_oneof![Just("debug".to_string()), Just("info".to_string()), Just("warn".to_string())],
            any::<(bool, bool)>(),
            any::<(bool, bool)>(),
            prop_oneof![Just("json".to_string()), Just("full".to_string()), Just("compact".to_string())],
        )
            .prop_map(|(level, (enabled, colored), (file_enabled, append), format)| LoggerSettings {
                level,
                console: ConsoleSettings { enabled, colored },
                file: FileSettings {
                    enabled: file_enabled,
                    path: default_log_path(),
                    append,
                    format,
                },
            })
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_server_config(),
            arb_database_config(),
            arb_auth_config(),
            arb_logger_settings(),
            any::<(bool, bool, bool)>(),
        )
            .prop_map(|(server, database, auth, logger, (booking, trivia, coffee))| Settings {
                application: ApplicationConfig::default(),
                server,
                database,
                auth,
                logger,
                services: ServicesConfig {
                    booking,
                    trivia,
                    coffee,
                },
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_settings_round_trip_through_toml(settings in arb_settings()) {
            let text = toml::to_string(&settings).expect("settings serialize");
            let back: Settings = toml::from_str(&text).expect("toml deserializes");
            prop_assert_eq!(settings, back);
        }
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.application.name, "triad-rs");
        assert_eq!(settings.server.address(), "127.0.0.1:3000");
        assert_eq!(settings.auth.algorithm, TokenAlgorithm::HS256);
        assert_eq!(settings.auth.leeway, 30);
        assert!(settings.services.booking && settings.services.trivia && settings.services.coffee);
    }

    #[test]
    fn test_partial_services_section() {
        let settings: Settings = toml::from_str(
            r#"
[services]
coffee = false

[auth]
algorithm = "RS256"
audience = "coffee"
"#,
        )
        .unwrap();
        assert!(settings.services.booking);
        assert!(!settings.services.coffee);
        assert_eq!(settings.auth.algorithm, TokenAlgorithm::RS256);
        assert_eq!(settings.auth.audience.as_deref(), Some("coffee"));
        assert_eq!(settings.auth.secret, None);
    }

    #[test]
    fn test_logger_settings_convert() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings::default(),
            file: FileSettings {
                enabled: true,
                path: "logs/x.log".to_string(),
                append: false,
                format: "compact".to_string(),
            },
        };
        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.path, PathBuf::from("logs/x.log"));
        assert!(!config.file.append);
    }

    #[test]
    fn test_bad_log_format_names_the_key() {
        let settings = FileSettings {
            format: "xml".to_string(),
            ..FileSettings::default()
        };
        let err = settings.into_file_config().unwrap_err();
        assert_eq!(err.field(), Some("logger.file.format"));
    }
}
