//! Bearer-token permission gate for the coffee-shop endpoints.
//!
//! A handler asks for `Authorized<P>`; extraction fails with an
//! [`AuthError`] unless the request carries a valid token granting `P::NAME`.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

use crate::error::{AppError, AuthError};
use crate::state::AppState;
use crate::utils::jwt::Claims;

/// A permission string an endpoint requires.
pub trait Permission {
    const NAME: &'static str;
}

pub struct ReadDrinkDetail;

impl Permission for ReadDrinkDetail {
    const NAME: &'static str = "get:drinks-detail";
}

pub struct CreateDrink;

impl Permission for CreateDrink {
    const NAME: &'static str = "post:drinks";
}

pub struct UpdateDrink;

impl Permission for UpdateDrink {
    const NAME: &'static str = "patch:drinks";
}

pub struct DeleteDrink;

impl Permission for DeleteDrink {
    const NAME: &'static str = "delete:drinks";
}

/// The decoded claim set of a request that holds permission `P`.
#[derive(Debug, Clone)]
pub struct Authorized<P> {
    pub claims: Claims,
    _permission: PhantomData<fn() -> P>,
}

impl<P> Authorized<P> {
    pub fn subject(&self) -> Option<&str> {
        self.claims.sub.as_deref()
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::InvalidHeader),
    }
}

impl<P> FromRequestParts<AppState> for Authorized<P>
where
    P: Permission,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let decoder = state.tokens.as_deref().ok_or_else(|| AppError::Internal {
            source: anyhow::anyhow!("no token decoder configured"),
        })?;

        let claims = decoder.decode(token)?;
        claims.require(P::NAME)?;
        tracing::debug!(sub = ?claims.sub, permission = P::NAME, "Request authorized");

        Ok(Self {
            claims,
            _permission: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingHeader));
    }

    #[test]
    fn test_malformed_header() {
        for value in ["Basic abc", "Bearer", "Bearer a b", "abc"] {
            assert_eq!(
                bearer_token(&headers(value)),
                Err(AuthError::InvalidHeader),
                "{value}"
            );
        }
    }

    #[test]
    fn test_permission_names() {
        assert_eq!(ReadDrinkDetail::NAME, "get:drinks-detail");
        assert_eq!(CreateDrink::NAME, "post:drinks");
        assert_eq!(UpdateDrink::NAME, "patch:drinks");
        assert_eq!(DeleteDrink::NAME, "delete:drinks");
    }
}
