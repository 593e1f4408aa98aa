//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown toolset: {0}")]
    UnknownToolset(String),

    #[error("Unknown agent preset: {0}")]
    UnknownAgentPreset(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Redaction(#[from] RedactionError),
}

/// Failures while assembling the tool set and its response schema.
///
/// These are fatal at startup: an agent cannot run with an ambiguous tool set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Schema construction failed: tool '{0}' is defined more than once")]
    DuplicateTool(String),

    #[error("Schema construction failed: {0}")]
    InvalidSchema(String),
}

/// Tool output contained hidden-region markup that could not be stripped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedactionError {
    #[error("Malformed redaction markup: start marker at byte {position} has no end marker")]
    MalformedMarkup { position: usize },
}

impl DomainError {
    /// Startup errors stop the process before any conversation happens
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownToolset(_)
                | DomainError::UnknownAgentPreset(_)
                | DomainError::Registry(_)
        )
    }
}
