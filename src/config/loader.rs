//! Layered configuration loading.
//!
//! Sources, lowest priority first:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml`
//! 3. `local.toml`
//! 4. `TRIAD_*` environment variables
//!
//! `TRIAD_CONFIG_FILE` replaces the three files with a single one.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "TRIAD_CONFIG_DIR";

const CONFIG_FILE_ENV: &str = "TRIAD_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "TRIAD";

/// `TRIAD_DATABASE__URL` -> `database.url`
const ENV_SEPARATOR: &str = "__";

#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Reads `TRIAD_CONFIG_DIR`, `TRIAD_CONFIG_FILE` and `TRIAD_APP_ENV`.
    ///
    /// The directory and single-file variables are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && dir_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{CONFIG_DIR_ENV} and {CONFIG_FILE_ENV} cannot both be set. \
                 Use {CONFIG_DIR_ENV} for layered configuration or \
                 {CONFIG_FILE_ENV} for a single configuration file."
            )));
        }

        Ok(Self {
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Single-file loader, used for `--config FILE`.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Overrides the environment overlay, used for `--env`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Loads without validating, so CLI overrides can still be applied.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        self.build_config()?
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize configuration: {e}")))
    }

    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.config_file {
            Some(config_file) => add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // Environment variables always win.
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = add_file_source(builder, &self.config_dir.join("default.toml"), true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = add_file_source(builder, &env_path, false)?;

        add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests share process environment variables.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const BASE: &str = r#"
[application]
name = "triad-test"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 3000

[database]
url = "postgres://localhost/triad_test"

[auth]
secret = "0123456789abcdef0123456789abcdef"

[logger]
level = "info"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Sets or clears variables for one test and restores them on drop.
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in [
                CONFIG_DIR_ENV,
                CONFIG_FILE_ENV,
                AppEnvironment::ENV_VAR,
                "TRIAD_SERVER__PORT",
                "TRIAD_DATABASE__URL",
                "TRIAD_SERVICES__COFFEE",
            ] {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_defaults_without_env() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();

        let loader = ConfigLoader::new().unwrap();
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_dir_and_file_are_exclusive() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/triad.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("TRIAD_CONFIG_DIR"));
                assert!(msg.contains("TRIAD_CONFIG_FILE"));
            }
            other => panic!("expected MutualExclusivityError, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());

        match ConfigLoader::new().unwrap().load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_full_precedence_chain() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let dir = setup_config_dir(&[
            ("default.toml", BASE),
            (
                "staging.toml",
                "[application]\nname = \"triad-staging\"\n[server]\nport = 3001\n[database]\nurl = \"postgres://staging/triad\"\n",
            ),
            ("local.toml", "[server]\nport = 3002\n"),
        ]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "staging");
        env.set("TRIAD_DATABASE__URL", "postgres://env/triad");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.application.name, "triad-staging");
        assert_eq!(settings.server.port, 3002);
        assert_eq!(settings.database.url, "postgres://env/triad");
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn test_env_var_parses_typed_values() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[("default.toml", BASE)]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.set("TRIAD_SERVER__PORT", "4000");
        env.set("TRIAD_SERVICES__COFFEE", "false");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.port, 4000);
        assert!(!settings.services.coffee);
        assert!(settings.services.trivia);
    }

    #[test]
    fn test_single_file_mode_skips_layers() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[
            ("default.toml", "[server]\nport = 1\n"),
            ("single.toml", BASE),
        ]);
        env.set(CONFIG_FILE_ENV, dir.path().join("single.toml").to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.application.name, "triad-test");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_from_file_with_environment_override() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();
        let dir = setup_config_dir(&[("triad.toml", BASE)]);

        let loader = ConfigLoader::from_file(dir.path().join("triad.toml"))
            .with_environment(AppEnvironment::Production);
        assert_eq!(loader.environment(), AppEnvironment::Production);
        assert_eq!(loader.load().unwrap().database.url, "postgres://localhost/triad_test");
    }

    #[test]
    fn test_validation_runs_after_merge() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[("default.toml", BASE)]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.set("TRIAD_DATABASE__URL", "mysql://localhost/triad");

        let loader = ConfigLoader::new().unwrap();
        assert!(loader.load_unvalidated().is_ok());
        let err = loader.load().unwrap_err();
        assert_eq!(err.field(), Some("database.url"));
    }
}
