//! Configuration file discovery and loading
//!
//! Config file resolution follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Per-user config file (`<config_dir>/gsort/config.toml`)
//! 4. Compiled defaults (fallback)

use crate::logging::DEFAULT_LOG_LEVEL;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "GSORT_CONFIG";

/// Logging section shared by every gsort config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directive (e.g. "info", "gsort_classifier=debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line
    CommandLine(PathBuf),
    /// `GSORT_CONFIG` environment variable
    Environment(PathBuf),
    /// Per-user default location
    UserFile(PathBuf),
    /// No file found; compiled defaults apply
    Defaults,
}

impl ConfigSource {
    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(p) | ConfigSource::Environment(p) | ConfigSource::UserFile(p) => {
                Some(p.as_path())
            }
            ConfigSource::Defaults => None,
        }
    }
}

/// Resolves which config file (if any) a binary should load
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    app_name: String,
    env_var: String,
}

impl ConfigResolver {
    /// Resolver for `GSORT_CONFIG` and `<config_dir>/<app_name>/config.toml`
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            env_var: CONFIG_ENV.to_string(),
        }
    }

    /// Override the environment variable consulted at priority 2
    pub fn with_env_var(mut self, env_var: &str) -> Self {
        self.env_var = env_var.to_string();
        self
    }

    /// Resolve the config source.
    ///
    /// A command-line path is always returned as-is (a missing file is reported
    /// when loading). An environment path that does not exist is skipped with a
    /// warning.
    pub fn resolve(&self, cli_arg: Option<&Path>) -> ConfigSource {
        if let Some(path) = cli_arg {
            return ConfigSource::CommandLine(path.to_path_buf());
        }

        if let Ok(value) = std::env::var(&self.env_var) {
            let path = PathBuf::from(value.trim());
            if !path.as_os_str().is_empty() {
                if path.exists() {
                    return ConfigSource::Environment(path);
                }
                warn!(
                    env_var = %self.env_var,
                    path = %path.display(),
                    "Config file from environment does not exist, ignoring"
                );
            }
        }

        if let Some(path) = self.user_config_path() {
            if path.exists() {
                return ConfigSource::UserFile(path);
            }
            debug!(path = %path.display(), "No user config file");
        }

        ConfigSource::Defaults
    }

    /// `<config_dir>/<app_name>/config.toml` for the current platform
    pub fn user_config_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(&self.app_name).join("config.toml"))
    }
}

/// Load a TOML config from the resolved source.
///
/// `Defaults` yields `T::default()`. A missing command-line file is a
/// configuration error; a malformed file is always an error.
pub fn load_config<T>(source: &ConfigSource) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = source.path() else {
        info!("No config file found, using compiled defaults");
        return Ok(T::default());
    };

    let config = load_toml_file(path)?;
    info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parse a TOML file into `T`
pub fn load_toml_file<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read config {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse config {} failed: {}", path.display(), e)))
}
