//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::{ConfigError, ServicesConfig, Settings};
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::utils::jwt::TokenDecoder;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since Services, AsyncDbPool and the decoder are
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
    /// Bearer token decoder; present whenever the coffee-shop service is mounted
    pub tokens: Option<Arc<TokenDecoder>>,
    /// Which services the router mounts
    pub mounted: ServicesConfig,
}

impl AppState {
    /// Initializes all repositories and services from the provided pool.
    pub fn new(pool: AsyncDbPool, mounted: ServicesConfig, tokens: Option<TokenDecoder>) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos);
        Self {
            services,
            db_pool: pool,
            tokens: tokens.map(Arc::new),
            mounted,
        }
    }

    /// Builds the state for `settings`, loading the token key only when the
    /// coffee-shop service needs it.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::from_settings(pool, &settings)?;
    /// ```
    pub fn from_settings(pool: AsyncDbPool, settings: &Settings) -> Result<Self, ConfigError> {
        let tokens = if settings.services.coffee {
            Some(TokenDecoder::from_config(&settings.auth)?)
        } else {
            None
        };
        Ok(Self::new(pool, settings.services, tokens))
    }
}
