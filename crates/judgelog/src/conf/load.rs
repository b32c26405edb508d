//! Load — config loading from file and environment variables.

use std::path::Path;

use super::model::{ConfigError, JudgeLogConfig};

/// Env var naming the config file.
pub const CONFIG_FILE_ENV: &str = "JUDGELOG_CONFIG_FILE";
pub const DEFAULT_CONFIG_FILE: &str = "judgelog.toml";

impl JudgeLogConfig {
    /// Load configuration.
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// `explicit_path` (from the command line) wins over `JUDGELOG_CONFIG_FILE`
    /// and must exist; the default path is optional.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let config_path = std::env::var(CONFIG_FILE_ENV)
                    .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
                if Path::new(&config_path).exists() {
                    tracing::info!("Loading configuration from: {}", config_path);
                    Self::from_file(Path::new(&config_path))?
                } else {
                    tracing::info!("Config file not found at {}, using defaults", config_path);
                    Self::default()
                }
            }
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Environment variables override file config for runtime settings
    pub fn apply_env(&mut self) {
        if let Some(concurrency) = std::env::var("JUDGELOG_CONCURRENCY")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.concurrency = concurrency;
        }
        if let Some(pretty) = std::env::var("JUDGELOG_PRETTY")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.pretty = pretty;
        }
    }
}
