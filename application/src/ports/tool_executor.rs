//! Tool Executor port
//!
//! Defines the interface for looking up and dispatching registered tools.

use async_trait::async_trait;
use tooloop_domain::{StructuredCall, ToolContext, ToolDefinition, ToolOutcome};

/// Port for tool execution
///
/// This port defines how the application layer reaches the active tool set.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Definitions of all registered tools, in registration order
    fn definitions(&self) -> Vec<&ToolDefinition>;

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions().into_iter().find(|d| d.name == name)
    }

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.get_tool(name).is_some()
    }

    /// Get names of all available tools
    fn available_tools(&self) -> Vec<&str> {
        self.definitions().into_iter().map(|d| d.name.as_str()).collect()
    }

    /// Coerce arguments and invoke the named tool.
    ///
    /// Never fails: coercion errors, tool errors and unknown names all come
    /// back as an error [`ToolOutcome`].
    async fn execute(&self, call: &StructuredCall, ctx: &mut ToolContext) -> ToolOutcome;
}
