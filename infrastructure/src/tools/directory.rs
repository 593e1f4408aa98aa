//! Working directory tool: change_directory

use async_trait::async_trait;
use serde_json::Value;
use tooloop_domain::tool::{Tool, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolParameter};
use tracing::info;

/// Tool name constant
pub const CHANGE_DIRECTORY: &str = "change_directory";

/// Get the tool definition for change_directory
pub fn change_directory_definition() -> ToolDefinition {
    ToolDefinition::new(
        CHANGE_DIRECTORY,
        "Changes the current working directory used by file and shell tools. \
         Returns the new working directory.",
    )
    .with_parameter(ToolParameter::new(
        "path",
        "Directory to change into, absolute or relative to the current one",
        true,
    ))
}

pub struct ChangeDirectoryTool {
    definition: ToolDefinition,
}

impl ChangeDirectoryTool {
    pub fn new() -> Self {
        Self {
            definition: change_directory_definition(),
        }
    }
}

impl Default for ChangeDirectoryTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ChangeDirectoryTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, args: ToolArguments, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let path = args.require_str("path")?;
        let target = ctx.resolve_path(path);

        let target = tokio::fs::canonicalize(&target)
            .await
            .map_err(|_| ToolError::not_found(format!("Directory does not exist: {}", path)))?;
        if !target.is_dir() {
            return Err(ToolError::invalid_argument(format!(
                "'{}' is not a directory",
                path
            )));
        }

        info!(from = %ctx.working_dir().display(), to = %target.display(), "Changing working directory");
        ctx.set_working_dir(target.clone());
        Ok(Value::String(target.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn args(path: &str) -> ToolArguments {
        let mut raw = Map::new();
        raw.insert("path".to_string(), json!(path));
        ToolArguments::coerce(&change_directory_definition(), &raw).unwrap()
    }

    #[tokio::test]
    async fn test_change_into_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let root = dir.path().canonicalize().unwrap();
        let mut ctx = ToolContext::new(&root);

        let result = ChangeDirectoryTool::new()
            .invoke(args("sub"), &mut ctx)
            .await
            .unwrap();

        assert_eq!(ctx.working_dir(), root.join("sub"));
        assert_eq!(result, json!(root.join("sub").display().to_string()));
    }

    #[tokio::test]
    async fn test_change_to_parent_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let root = dir.path().canonicalize().unwrap();
        let mut ctx = ToolContext::new(root.join("sub"));

        ChangeDirectoryTool::new()
            .invoke(args(".."), &mut ctx)
            .await
            .unwrap();
        assert_eq!(ctx.working_dir(), root);
    }

    #[tokio::test]
    async fn test_change_to_missing_directory_keeps_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ToolContext::new(dir.path());

        let err = ChangeDirectoryTool::new()
            .invoke(args("does-not-exist"), &mut ctx)
            .await
            .unwrap_err();
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(ctx.working_dir(), dir.path());
    }
}
