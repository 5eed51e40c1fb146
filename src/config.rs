//! Database settings.
//!
//! [`DatabaseConfig::load`] reads the `database` section of `config/config.toml`
//! (optional) overlaid with `ACTIVEROW__DATABASE__*` environment variables.
//!
//! ```toml
//! [database]
//! path = "db/app.sqlite3"
//! log_queries = true
//! busy_timeout_ms = 2000
//! ```

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "config/config.toml";
const ENV_PREFIX: &str = "ACTIVEROW";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// Database file, or `:memory:` for a private in-memory database.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Log every statement at `info` instead of `trace`.
    #[serde(default)]
    pub log_queries: bool,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            log_queries: false,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_db_path() -> String {
    ":memory:".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl DatabaseConfig {
    /// Load the database configuration from `config/config.toml`, falling back to env vars.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when neither source can be read, or when the
    /// `database` section holds values of the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // The file exists but is unreadable; env alone may still be enough
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    log::warn!("failed to load {DEFAULT_CONFIG_FILE}, falling back to env: {err}");
                }
                Config::builder()
                    .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {err}, then env-only error: {env_err}"
                        ))
                    })?
            }
        };

        Self::from_settings(&settings)
    }

    /// Load the `database` section of an explicit file, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unparsable, or holds values
    /// of the wrong type.
    pub fn load_from<P: AsRef<Path>>(file: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(file.as_ref()))
            .build()?;
        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self, ConfigError> {
        match settings.get::<DatabaseConfig>("database") {
            Ok(cfg) => Ok(cfg),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Database configuration could not be loaded from file or environment: {e}"
            ))),
        }
    }
}
