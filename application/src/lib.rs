//! Application layer for tooloop
//!
//! This crate contains the orchestration loop, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AGENT_PRESETS, AgentPreset, ExecutionParams};
pub use ports::{
    agent_progress::{AgentProgressNotifier, NoAgentProgress},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, StructuralHint},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::run_agent::{
    AgentSession, CallDisposition, LoopState, RunAgentError, StopReason, TurnOutcome,
};
