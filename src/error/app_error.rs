use diesel_async::pooled_connection::bb8::RunError;
use thiserror::Error;

use crate::config::error::ConfigError;
use crate::error::{AuthError, DatabaseErrorConverter};

/// Application-wide error type that represents all possible errors in the system.
///
/// Each variant corresponds to one failure class a client can observe. The
/// HTTP mapping lives in `api::middleware::error_handler`; internal sources are
/// logged there and never serialized.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Structurally invalid or rejected input, carrying a user-facing message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// A form submission refused by the write workflow; `message` is the flash text
    #[error("Rejected: {message}")]
    Rejected { message: String },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Field-level errors collected by `validator`
    #[error("Validation failed: {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// A mutation failed unexpectedly and was rolled back
    #[error("Unprocessable: {message}")]
    Unprocessable { message: String },

    /// Wrong verb on an existing path
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Bearer credential or permission problem
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// A single failed field from a `validator::ValidationErrors` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl AppError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
        }
    }

    /// The generic 422 used by the trivia and coffee services.
    pub fn unprocessable() -> Self {
        AppError::Unprocessable {
            message: "unprocessable".to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<RunError> for AppError {
    fn from(error: RunError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.field().unwrap_or("configuration").to_string();
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| ValidationFieldError {
                    field: field.to_string(),
                    message: failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", failure.code)),
                })
            })
            .collect();
        // HashMap iteration order is unstable; keep reports deterministic.
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: fields }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(length(min = 1))]
        city: String,
    }

    #[test]
    fn test_validation_errors_are_flattened_and_sorted() {
        let probe = Probe {
            name: String::new(),
            city: String::new(),
        };
        let error = AppError::from(probe.validate().unwrap_err());

        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "city");
                assert!(errors[0].message.contains("length"));
                assert_eq!(errors[1].field, "name");
                assert_eq!(errors[1].message, "Name is required");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_config_error_keeps_field_as_key() {
        let error = AppError::from(ConfigError::validation("server.port", "bad port"));
        match error {
            AppError::Configuration { key, .. } => assert_eq!(key, "server.port"),
            other => panic!("Expected Configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_helper() {
        let error = AppError::not_found("venue", 7);
        assert_eq!(error.to_string(), "Resource not found: venue with id=7");
    }
}
