//! Domain layer for tooloop
//!
//! This crate contains the core entities and pure logic of a structured
//! tool-calling agent. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **History**: append-only conversation log sent to the backend each turn
//! - **StructuredCall**: one `{thoughts?, call_tool, arguments}` object per
//!   backend reply
//! - **ResponseSchema**: `anyOf` of one variant per registered tool, used to
//!   constrain and validate backend output
//! - **Tool**: definition plus `invoke(args, ctx)`; failures are values
//! - **Redaction / envelope**: how tool output re-enters the conversation

pub mod config;
pub mod core;
pub mod prompt;
pub mod session;
pub mod structured;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use config::FunctionCallingMode;
pub use core::error::{DomainError, RedactionError, RegistryError};
pub use prompt::{AgentPromptTemplate, PromptStyle};
pub use session::{History, Message, Role};
pub use structured::{
    EnvelopeOptions, ExtractedObject, ParseTier, ResponseSchema, ResponseValidator,
    ValidationFailure, extract_json_object, format_tool_output, redact, redact_value,
};
pub use tool::{
    ArgValue, ObjectType, ParamType, ResolvedSelection, StructuredArg, StructuredCall,
    TERMINAL_TOOL, Tool, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolOutcome,
    ToolParameter, ToolSelection,
};
