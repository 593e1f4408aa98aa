//! LLM Gateway port
//!
//! Defines the interface for requesting completions from an LLM backend.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tooloop_domain::{FunctionCallingMode, Message, ResponseSchema};

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Output constraint attached to a completion request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StructuralHint<'a> {
    /// Constrain output to this JSON schema
    JsonSchema { name: &'a str, schema: &'a Value },
    /// Ask for any JSON object
    JsonObject,
    /// Unconstrained text
    None,
}

impl<'a> StructuralHint<'a> {
    pub fn for_mode(mode: FunctionCallingMode, schema: &'a ResponseSchema) -> Self {
        match mode {
            FunctionCallingMode::JsonSchema => StructuralHint::JsonSchema {
                name: schema.title(),
                schema: schema.document(),
            },
            FunctionCallingMode::JsonMode => StructuralHint::JsonObject,
            FunctionCallingMode::None => StructuralHint::None,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to a completion
/// backend. Implementations (adapters) live in the infrastructure layer.
/// The conversation is passed in full on every call; gateways keep no state.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Backend identifier for logs (e.g., model name)
    fn name(&self) -> &str;

    /// Request one completion over `messages` and return the raw text
    async fn complete(
        &self,
        messages: &[Message],
        hint: StructuralHint<'_>,
    ) -> Result<String, GatewayError>;
}
