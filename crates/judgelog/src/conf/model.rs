//! Model — JudgeLogConfig and related structs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::VerdictTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeLogConfig {
    /// Raw judge verdict token → display label
    pub verdicts: VerdictTable,
    pub limits: SubmissionLimits,
    /// Logs parsed at once by the CLI
    pub concurrency: usize,
    pub pretty: bool,
}

/// Static submission limits.
///
/// Carried for consumers that accept uploads; parsing never checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionLimits {
    /// Accepted source MIME types
    pub accept_mime: Vec<String>,
    /// Maximum source size
    pub code_size_limit: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl Default for JudgeLogConfig {
    fn default() -> Self {
        Self {
            verdicts: VerdictTable::default(),
            limits: SubmissionLimits::default(),
            concurrency: 8,
            pretty: false,
        }
    }
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            accept_mime: vec!["text/x-c".to_string(), "text/x-pascal".to_string()],
            code_size_limit: 2000,
        }
    }
}

impl SubmissionLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.accept_mime.is_empty() {
            return Err(ConfigError::Invalid("limits.accept_mime must not be empty".to_string()));
        }
        if let Some(bad) = self.accept_mime.iter().find(|m| !m.contains('/')) {
            return Err(ConfigError::Invalid(format!(
                "limits.accept_mime entry {:?} is not a type/subtype MIME string",
                bad
            )));
        }
        if self.code_size_limit == 0 {
            return Err(ConfigError::Invalid("limits.code_size_limit must be > 0".to_string()));
        }
        Ok(())
    }
}

impl JudgeLogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be > 0".to_string()));
        }
        self.limits.validate()
    }
}
