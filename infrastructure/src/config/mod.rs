//! Configuration file loading for tooloop
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOOLOOP_*` environment variables (`TOOLOOP_AGENT__MAX_RETRIES=3`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./tooloop.toml` or `./.tooloop.toml`
//! 4. Global: `~/.config/tooloop/config.toml` (platform config dir)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileBackendConfig, FileConfig, FileLoggingConfig,
    FileToolsConfig,
};
pub use loader::ConfigLoader;
