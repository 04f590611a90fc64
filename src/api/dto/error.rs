//! Error response DTOs.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AuthError;

/// Standard error body shared by every service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    /// The HTTP status code, repeated in the body
    #[schema(example = 404)]
    pub error: u16,
    #[schema(example = "resource not Found")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Body of a permission-gate failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthErrorResponse {
    #[schema(example = "unauthorized")]
    pub code: String,
    #[schema(example = "Permission 'post:drinks' not found.")]
    pub description: String,
}

impl From<&AuthError> for AuthErrorResponse {
    fn from(error: &AuthError) -> Self {
        Self {
            code: error.code().to_string(),
            description: error.to_string(),
        }
    }
}
