//! Migrate command: apply, preview or revert schema migrations.

use crate::config::settings::Settings;
use crate::db;
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        if dry_run {
            let pending = db::pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {name}");
                }
                println!("\nRun without --dry-run to apply them");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            let reverted = db::revert_migrations(url, steps).await?;
            tracing::warn!(count = reverted.len(), "Migrations reverted");
            println!("✓ Rolled back {} migration(s):", reverted.len());
            for version in &reverted {
                println!("  - {version}");
            }
            return Ok(());
        }

        let applied = db::run_pending_migrations(url).await?;
        tracing::info!(count = applied.len(), "Migrations applied");
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {version}");
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn config_with_url(url: &str) -> Settings {
        let mut config = Settings::default();
        config.database.url = url.to_string();
        config
    }

    #[tokio::test]
    async fn test_zero_rollback_steps() {
        let handler = MigrateCommandHandler::new(config_with_url("postgres://localhost/triad"));
        assert_eq!(handler.config().database.url, "postgres://localhost/triad");

        match handler.execute(false, Some(0)).await {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("must be greater than 0"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_database_url_fails_before_connecting() {
        let handler = MigrateCommandHandler::new(config_with_url(""));
        let result = handler.execute(true, None).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
