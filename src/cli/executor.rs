//! Dispatches a parsed command to its handler.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Runs the command in `cli` with already merged settings. No subcommand
/// means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    warn_about_arguments(cli);

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

/// Legal but probably unintended argument combinations.
fn warn_about_arguments(cli: &Cli) {
    match &cli.command {
        Some(Commands::Serve {
            host: Some(host),
            port: Some(port),
            ..
        }) if *port < 1024 && host == "0.0.0.0" => {
            tracing::warn!(port, "Binding to a privileged port usually requires root");
        }
        Some(Commands::Migrate {
            rollback: Some(steps),
            ..
        }) if *steps > 50 => {
            tracing::warn!(steps, "Rolling back many migrations at once");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, DatabaseConfig};
    use clap::Parser;

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
    async fn test_serve_dry_run() {
        let cli = Cli::try_parse_from(["triad-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_migrate_zero_rollback_is_rejected() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: false,
                rollback: Some(0),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };
        assert!(execute_command(&cli, valid_config()).await.is_err());
    }
}
