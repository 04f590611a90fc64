//! Applies CLI overrides on top of file and environment configuration.
//!
//! Precedence, highest first: serve flags, global flags, `TRIAD_*`
//! variables, configuration files.

use super::parser::{Cli, Commands, Service};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, ServicesConfig, settings::Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the unvalidated base configuration selected by `--config` and
    /// `--env`; validation waits until the overrides are in.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };
        tracing::debug!(environment = loader.environment().as_str(), "Loading configuration");
        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Returns the merged settings, validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            services,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
            if !services.is_empty() {
                config.services = only(services);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

fn only(services: &[Service]) -> ServicesConfig {
    ServicesConfig {
        booking: services.contains(&Service::Booking),
        trivia: services.contains(&Service::Trivia),
        coffee: services.contains(&Service::Coffee),
    }
}
