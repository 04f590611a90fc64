use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the bearer-token permission gate.
///
/// Each variant carries a stable machine-readable code; the HTTP body for
/// these is `{"code": .., "description": ..}` rather than the standard
/// error envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,

    #[error("Authorization header must be a bearer token.")]
    InvalidHeader,

    #[error("Token expired.")]
    Expired,

    #[error("Unable to parse authentication token.")]
    InvalidToken,

    #[error("Permissions not included in JWT.")]
    MissingPermissions,

    #[error("Permission '{0}' not found.")]
    PermissionDenied(&'static str),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "authorization_header_missing",
            AuthError::InvalidHeader => "invalid_header",
            AuthError::Expired => "token_expired",
            AuthError::InvalidToken => "invalid_token",
            AuthError::MissingPermissions => "invalid_claims",
            AuthError::PermissionDenied(_) => "unauthorized",
        }
    }

    /// 401 for credential problems, 403 once a valid token lacks the grant.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingPermissions | AuthError::PermissionDenied(_) => {
                StatusCode::FORBIDDEN
            }
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failures_are_unauthorized() {
        for error in [
            AuthError::MissingHeader,
            AuthError::InvalidHeader,
            AuthError::Expired,
            AuthError::InvalidToken,
        ] {
            assert_eq!(error.status(), StatusCode::UNAUTHORIZED, "{}", error.code());
        }
    }

    #[test]
    fn test_permission_failures_are_forbidden() {
        assert_eq!(AuthError::MissingPermissions.status(), StatusCode::FORBIDDEN);
        let denied = AuthError::PermissionDenied("post:drinks");
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
        assert_eq!(denied.code(), "unauthorized");
        assert_eq!(denied.to_string(), "Permission 'post:drinks' not found.");
    }
}
