//! Layered configuration for the `polls` binary.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level configuration file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "polls.toml";

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "POLLS_";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollsConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// `tracing` filter directive used when no `-v` flag is given.
    pub log_filter: String,
}

impl Default for PollsConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/polls".to_owned(),
            pool_size: 4,
            log_filter: "warn".to_owned(),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),
    /// The merged configuration could not be extracted.
    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Configuration loader that merges defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `POLLS_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project file `./polls.toml`
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] when `explicit_path` does not
    /// exist, or [`ConfigError::Extract`] when a source holds values of the
    /// wrong type.
    pub fn load(explicit_path: Option<&Path>) -> Result<PollsConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(PollsConfig::default()));

        let project_path = Path::new(PROJECT_CONFIG_FILE);
        if project_path.exists() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|err| ConfigError::Extract(Box::new(err)))
    }
}
