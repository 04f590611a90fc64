//! Bearer token decoding for the coffee-shop permission gate.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::config::{AuthConfig, ConfigError, TokenAlgorithm};
use crate::error::AuthError;

/// The claim set carried by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Absent is distinct from empty: a token without the claim is malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Checks that `permission` was granted.
    pub fn require(&self, permission: &'static str) -> Result<(), AuthError> {
        let granted = self
            .permissions
            .as_ref()
            .ok_or(AuthError::MissingPermissions)?;
        if granted.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(permission))
        }
    }
}

/// Verifies token signatures and standard claims with the configured key.
pub struct TokenDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl TokenDecoder {
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        let (algorithm, key) = match config.algorithm {
            TokenAlgorithm::HS256 => {
                let secret = config
                    .secret
                    .as_deref()
                    .filter(|secret| !secret.is_empty())
                    .ok_or_else(|| ConfigError::validation("auth.secret", "missing HS256 secret"))?;
                (Algorithm::HS256, DecodingKey::from_secret(secret.as_bytes()))
            }
            TokenAlgorithm::RS256 => {
                let pem = config.public_key_pem.as_deref().ok_or_else(|| {
                    ConfigError::validation("auth.public_key_pem", "missing RS256 public key")
                })?;
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| ConfigError::validation("auth.public_key_pem", e.to_string()))?;
                (Algorithm::RS256, key)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = config.leeway;
        validation.set_required_spec_claims(&["exp"]);
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self { key, validation })
    }

    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                kind => {
                    tracing::debug!(?kind, "Bearer token rejected");
                    AuthError::InvalidToken
                }
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    pub(crate) const SECRET: &str = "0123456789abcdef0123456789abcdef";

    pub(crate) fn hs256_config() -> AuthConfig {
        AuthConfig {
            secret: Some(SECRET.to_string()),
            ..AuthConfig::default()
        }
    }

    /// Signs a token with `SECRET` that expires `ttl` seconds from now.
    pub(crate) fn sign(permissions: Option<&[&str]>, ttl: i64) -> String {
        let now = jiff::Timestamp::now().as_second();
        let claims = Claims {
            sub: Some("auth0|barista".to_string()),
            exp: now + ttl,
            iat: Some(now),
            permissions: permissions.map(|p| p.iter().map(|s| s.to_string()).collect()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_round_trips_claims() {
        let decoder = TokenDecoder::from_config(&hs256_config()).unwrap();
        let claims = decoder
            .decode(&sign(Some(&["get:drinks-detail"]), 3600))
            .unwrap();
        assert_eq!(claims.sub.as_deref(), Some("auth0|barista"));
        assert!(claims.require("get:drinks-detail").is_ok());
    }

    #[test]
    fn test_expired_token() {
        let decoder = TokenDecoder::from_config(&hs256_config()).unwrap();
        assert_eq!(
            decoder.decode(&sign(Some(&[]), -3600)),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn test_wrong_key_and_garbage_are_invalid() {
        let other = AuthConfig {
            secret: Some("ffffffffffffffffffffffffffffffff".to_string()),
            ..AuthConfig::default()
        };
        let decoder = TokenDecoder::from_config(&other).unwrap();
        assert_eq!(
            decoder.decode(&sign(Some(&[]), 3600)),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(decoder.decode("not.a.token"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_audience_is_checked_when_configured() {
        let config = AuthConfig {
            audience: Some("coffee".to_string()),
            ..hs256_config()
        };
        let decoder = TokenDecoder::from_config(&config).unwrap();
        assert_eq!(
            decoder.decode(&sign(Some(&[]), 3600)),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_require_distinguishes_missing_claim() {
        let mut claims = Claims {
            sub: None,
            exp: 0,
            iat: None,
            permissions: None,
        };
        assert_eq!(
            claims.require("post:drinks"),
            Err(AuthError::MissingPermissions)
        );

        claims.permissions = Some(vec!["get:drinks-detail".to_string()]);
        assert_eq!(
            claims.require("post:drinks"),
            Err(AuthError::PermissionDenied("post:drinks"))
        );
    }

    #[test]
    fn test_missing_key_material() {
        assert!(TokenDecoder::from_config(&AuthConfig::default()).is_err());

        let rs = AuthConfig {
            algorithm: TokenAlgorithm::RS256,
            public_key_pem: Some("-----BEGIN PUBLIC KEY-----\nnope\n-----END PUBLIC KEY-----".to_string()),
            ..AuthConfig::default()
        };
        let err = TokenDecoder::from_config(&rs).err().unwrap();
        assert_eq!(err.field(), Some("auth.public_key_pem"));
    }
}
