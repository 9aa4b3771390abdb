//! Configuration file handling
//!
//! The configuration is a single JSON object. Every field has a default, so
//! `{}` is a valid file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::args::{ConfigArgs, DEFAULT_CONFIG_PATH};
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one YAML file per cheat sheet
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// HTTP listener settings
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_data_dir() -> String {
    "./cheatsheets".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            server: HttpServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve configuration for a command.
    ///
    /// An explicit `--config` must exist. The default path is optional and
    /// falls back to built-in defaults. `--data-dir` overrides the file.
    pub fn resolve(args: &ConfigArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(dir) = &args.data_dir {
            config.data_dir = dir.to_string_lossy().into_owned();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be > 0"));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        let invalid = self.server.invalid_cors_origins();
        if !invalid.is_empty() {
            return Err(CliError::config_error(format!(
                "Invalid server.cors_origins: {:?}",
                invalid
            )));
        }

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Serialize as pretty JSON
    pub fn to_json_pretty(&self) -> CliResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CliError::config_error(format!("Failed to serialize config: {}", e)))
    }
}
