//! Tool contract

use super::arguments::ToolArguments;
use super::context::ToolContext;
use super::entities::ToolDefinition;
use super::value_objects::ToolError;
use async_trait::async_trait;
use serde_json::Value;

/// A callable tool.
///
/// Implementations receive arguments already coerced against
/// [`definition`](Tool::definition) and the owning session's [`ToolContext`].
/// Failures are returned as [`ToolError`], never panics.
#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    fn name(&self) -> &str {
        &self.definition().name
    }

    async fn invoke(&self, args: ToolArguments, ctx: &mut ToolContext) -> Result<Value, ToolError>;
}
