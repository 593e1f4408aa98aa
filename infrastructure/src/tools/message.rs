//! Terminal tool: send_message

use async_trait::async_trait;
use serde_json::Value;
use tooloop_domain::tool::{
    TERMINAL_TOOL, Tool, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolParameter,
};

/// Get the tool definition for send_message
pub fn send_message_definition() -> ToolDefinition {
    ToolDefinition::new(
        TERMINAL_TOOL,
        "Sends a message to the user. Use this to answer, to ask for clarification, \
         or to report the result of your work. Ends your turn.",
    )
    .with_parameter(ToolParameter::new("message", "The message to show to the user", true))
}

/// Declares the terminal tool.
///
/// The orchestration loop delivers a `send_message` call to the user and never
/// dispatches it; invoking it directly just echoes the message back.
pub struct SendMessageTool {
    definition: ToolDefinition,
}

impl SendMessageTool {
    pub fn new() -> Self {
        Self {
            definition: send_message_definition(),
        }
    }
}

impl Default for SendMessageTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SendMessageTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, args: ToolArguments, _ctx: &mut ToolContext) -> Result<Value, ToolError> {
        Ok(Value::String(args.require_str("message")?.to_string()))
    }
}
