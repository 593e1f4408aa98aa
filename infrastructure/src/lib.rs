//! Infrastructure layer for tooloop
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the HTTP completion backend, the tool catalog and
//! registry, configuration file loading, and the JSONL transcript.

pub mod backend;
pub mod config;
pub mod logging;
pub mod tools;

// Re-export commonly used types
pub use backend::OpenAiCompatibleGateway;
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileBackendConfig, FileConfig,
    FileLoggingConfig, FileToolsConfig,
};
pub use logging::JsonlConversationLogger;
pub use tools::{JsonSchemaToolConverter, ToolRegistry, default_catalog};
