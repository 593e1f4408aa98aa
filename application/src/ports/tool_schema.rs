//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how they are described in
//! JSON Schema" (infrastructure). The schemas feed both the system prompt and
//! the response schema the backend is constrained with.

use serde_json::Value;
use tooloop_domain::ToolDefinition;

/// Port for converting tool definitions to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// `{name, description, parameters}` document for one tool
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value;

    /// JSON Schema of the tool's `arguments` object
    fn parameters_schema(&self, tool: &ToolDefinition) -> Value;

    /// Convert all tools, keeping their order
    fn all_tools_schema(&self, tools: &[&ToolDefinition]) -> Vec<Value> {
        tools.iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
