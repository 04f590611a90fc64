//! Error handler for converting AppError to HTTP responses.
//!
//! Every service shares one error body, `{"success": false, "error": <status>,
//! "message": ..}`. Permission-gate failures are the exception and answer
//! `{"code": .., "description": ..}`. Internal error sources are logged here
//! and never serialized.

use axum::{
    Json,
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::{AuthErrorResponse, ErrorResponse};
use crate::error::AppError;

/// Bodies larger than this are not read back for logging.
const MAX_LOGGED_BODY: usize = 16 * 1024;

/// The fixed message for a status, used wherever no specific text applies.
pub fn standard_message(status: StatusCode) -> String {
    match status {
        StatusCode::BAD_REQUEST => "bad request".to_string(),
        StatusCode::NOT_FOUND => "resource not Found".to_string(),
        StatusCode::METHOD_NOT_ALLOWED => "method not allowed".to_string(),
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR => "internal server error".to_string(),
        StatusCode::SERVICE_UNAVAILABLE => "service unavailable".to_string(),
        other => other
            .canonical_reason()
            .unwrap_or("error")
            .to_ascii_lowercase(),
    }
}

/// Maps an AppError variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::BadRequest { .. }
        | AppError::Rejected { .. }
        | AppError::Validation { .. }
        | AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        AppError::Auth(error) => error.status(),
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// The client-facing message; internal variants collapse to the standard text.
fn public_message(error: &AppError, status: StatusCode) -> String {
    match error {
        AppError::BadRequest { message }
        | AppError::Rejected { message }
        | AppError::Unprocessable { message } => message.clone(),
        AppError::Validation { field, reason } => format!("{field}: {reason}"),
        AppError::ValidationErrors { errors } => errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; "),
        _ => standard_message(status),
    }
}

fn log_error(error: &AppError) {
    match error {
        AppError::Database { operation, source } => {
            tracing::error!(operation = %operation, error = ?source, "Database operation failed");
        }
        AppError::Configuration { key, source } => {
            tracing::error!(key = %key, error = ?source, "Configuration error");
        }
        AppError::ConnectionPool { source } => {
            tracing::error!(error = ?source, "Connection pool unavailable");
        }
        AppError::Internal { source } => {
            tracing::error!(error = ?source, "Internal error");
        }
        AppError::Auth(auth) => {
            tracing::info!(code = auth.code(), "Authorization refused");
        }
        other => tracing::debug!(error = %other, "Request failed"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log_error(&self);
        let status = error_to_status_code(&self);

        if let AppError::Auth(auth) = &self {
            return (status, Json(AuthErrorResponse::from(auth))).into_response();
        }

        let body = ErrorResponse::new(status, public_message(&self, status));
        (status, Json(body)).into_response()
    }
}

/// Reshapes framework-produced error responses (unknown path, wrong verb,
/// path or query rejections) into the standard JSON error body.
///
/// Responses that already carry JSON pass through untouched.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    if is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    if let Ok(bytes) = axum::body::to_bytes(body, MAX_LOGGED_BODY).await {
        if !bytes.is_empty() {
            tracing::debug!(
                status = status.as_u16(),
                original = %String::from_utf8_lossy(&bytes).trim(),
                "Replacing framework error body"
            );
        }
    }

    let mut reshaped =
        (status, Json(ErrorResponse::new(status, standard_message(status)))).into_response();
    // A 405 keeps its list of allowed methods.
    if let Some(allow) = parts.headers.get(header::ALLOW) {
        reshaped.headers_mut().insert(header::ALLOW, allow.clone());
    }
    reshaped
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    reshaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthError, ValidationFieldError};
    use axum::{Router, body::Body, routing::get};
    use tower::ServiceExt;

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::not_found("venue", 1), StatusCode::NOT_FOUND),
            (AppError::bad_request("bad request"), StatusCode::BAD_REQUEST),
            (
                AppError::Rejected {
                    message: "An error occurred.".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (AppError::unprocessable(), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (AppError::Auth(AuthError::MissingHeader), StatusCode::UNAUTHORIZED),
            (
                AppError::Auth(AuthError::PermissionDenied("post:drinks")),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timed out"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error_to_status_code(&error), expected, "{error}");
        }
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = AppError::not_found("question", 1000).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"success": false, "error": 404, "message": "resource not Found"})
        );
    }

    #[tokio::test]
    async fn test_rejection_message_is_passed_through() {
        let message = "An error occurred. Venue X could not be listed. Invalid phone number.";
        let response = AppError::Rejected {
            message: message.to_string(),
        }
        .into_response();
        assert_eq!(json_body(response).await["message"], message);
    }

    #[tokio::test]
    async fn test_internal_source_is_not_leaked() {
        let response = AppError::Database {
            operation: "insert".to_string(),
            source: anyhow::anyhow!("relation \"venues\" does not exist"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["message"], "internal server error");
    }

    #[tokio::test]
    async fn test_validation_errors_are_joined() {
        let response = AppError::ValidationErrors {
            errors: vec![
                ValidationFieldError {
                    field: "city".to_string(),
                    message: "City is required".to_string(),
                },
                ValidationFieldError {
                    field: "name".to_string(),
                    message: "Name is required".to_string(),
                },
            ],
        }
        .into_response();
        assert_eq!(
            json_body(response).await["message"],
            "city: City is required; name: Name is required"
        );
    }

    #[tokio::test]
    async fn test_auth_body_shape() {
        let response = AppError::Auth(AuthError::Expired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"code": "token_expired", "description": "Token expired."})
        );
    }

    #[tokio::test]
    async fn test_framework_errors_are_reshaped() {
        let app = Router::new()
            .route("/drinks", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(global_error_handler));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "resource not Found");

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/drinks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"success": false, "error": 405, "message": "method not allowed"})
        );
    }

    #[test]
    fn test_standard_message_fallback() {
        assert_eq!(
            standard_message(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            "unsupported media type"
        );
    }
}
