//! Serve command: start the server, or only check the configuration.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::server::Server;
use crate::utils::jwt::TokenDecoder;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }
        Server::new(self.config).run().await
    }

    /// Runs every startup check that needs no database, then reports what
    /// the server would do.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        if self.config.services.coffee {
            TokenDecoder::from_config(&self.config.auth)?;
        }

        let services = self.config.services;
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Services: booking={} trivia={} coffee={}",
            services.booking, services.trivia, services.coffee
        );
        println!(
            "✓ Migrations on startup: {}",
            if self.config.database.auto_migrate { "yes" } else { "no" }
        );
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, DatabaseConfig, ServicesConfig, TokenAlgorithm};
    use crate::error::AppError;

    fn valid_config() -> Settings {
        Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/triad".to_string(),
                ..Default::default()
            },
            auth: AuthConfig {
                secret: Some("0123456789abcdef0123456789abcdef".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dry_run_accepts_valid_config() {
        let handler = ServeCommandHandler::new(valid_config());
        assert_eq!(handler.config(), &valid_config());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_rejects_bad_port() {
        let mut config = valid_config();
        config.server.port = 0;
        let result = ServeCommandHandler::new(config).execute(true).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_dry_run_rejects_unparsable_public_key() {
        let mut config = valid_config();
        config.auth = AuthConfig {
            algorithm: TokenAlgorithm::RS256,
            public_key_pem: Some(
                "-----BEGIN PUBLIC KEY-----\nnot base64\n-----END PUBLIC KEY-----".to_string(),
            ),
            ..Default::default()
        };
        let result = ServeCommandHandler::new(config.clone()).execute(true).await;
        assert!(result.is_err());

        config.services = ServicesConfig {
            coffee: false,
            ..ServicesConfig::default()
        };
        assert!(ServeCommandHandler::new(config).execute(true).await.is_ok());
    }
}
