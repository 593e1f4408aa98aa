//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agent;
mod backend;
mod logging;
mod tools;

pub use agent::FileAgentConfig;
pub use backend::FileBackendConfig;
pub use logging::FileLoggingConfig;
pub use tools::FileToolsConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("backend.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("backend.model cannot be empty")]
    EmptyModelName,

    #[error("agent.max_retries cannot be 0")]
    ZeroRetries,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion backend
    pub backend: FileBackendConfig,
    /// Agent preset, tool selection and loop bounds
    pub agent: FileAgentConfig,
    /// Tool context settings
    pub tools: FileToolsConfig,
    /// Transcript logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Check values that deserialize fine but cannot run
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.backend.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.backend.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.agent.max_retries == 0 {
            return Err(ConfigValidationError::ZeroRetries);
        }
        Ok(())
    }
}
