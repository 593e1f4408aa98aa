//! Search tool: grep

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tooloop_domain::tool::{
    ParamType, Tool, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolParameter,
};
use tracing::debug;

use super::command::{run_with_timeout, truncate_output};

/// Tool name constant
pub const GREP: &str = "grep";

/// Get the tool definition for grep
pub fn grep_definition() -> ToolDefinition {
    ToolDefinition::new(
        GREP,
        "Recursively searches files for a pattern and returns matching lines with line numbers.",
    )
    .with_parameter(ToolParameter::new("pattern", "Pattern to search for", true))
    .with_parameter(ToolParameter::new(
        "path",
        "File or directory to search (default: current directory)",
        false,
    ))
    .with_parameter(
        ToolParameter::new("ignore_case", "Case-insensitive search (default: true)", false)
            .with_type(ParamType::Boolean),
    )
}

/// Build the `grep -n [-i] -r` argument list
pub fn grep_args(pattern: &str, path: &str, ignore_case: bool) -> Vec<String> {
    let mut args = vec!["-n".to_string()];
    if ignore_case {
        args.push("-i".to_string());
    }
    args.push("-r".to_string());
    args.push("-e".to_string());
    args.push(pattern.to_string());
    args.push(path.to_string());
    args
}

pub struct GrepTool {
    definition: ToolDefinition,
}

impl GrepTool {
    pub fn new() -> Self {
        Self {
            definition: grep_definition(),
        }
    }
}

impl Default for GrepTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GrepTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, args: ToolArguments, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let pattern = args.require_str("pattern")?;
        let path = args.get_str("path").unwrap_or(".");
        let ignore_case = args.get_bool("ignore_case").unwrap_or(true);

        let mut command = Command::new("grep");
        command.args(grep_args(pattern, path, ignore_case));
        let output =
            run_with_timeout(command, ctx.working_dir(), ctx.command_timeout(), pattern).await?;

        // grep exits 1 when nothing matched
        match output.status.code() {
            Some(0) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                debug!(pattern, matches = stdout.lines().count(), "grep finished");
                Ok(Value::String(truncate_output(&stdout)))
            }
            Some(1) => Ok(Value::String("No matches found".to_string())),
            code => Err(ToolError::execution_failed(format!(
                "grep failed with return code {}: {}",
                code.unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn args(pairs: &[(&str, Value)]) -> ToolArguments {
        let raw: Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        ToolArguments::coerce(&grep_definition(), &raw).unwrap()
    }

    #[test]
    fn test_grep_args() {
        assert_eq!(
            grep_args("fn main", "src", true),
            vec!["-n", "-i", "-r", "-e", "fn main", "src"]
        );
        assert_eq!(grep_args("x", ".", false), vec!["-n", "-r", "-e", "x", "."]);
    }

    #[tokio::test]
    async fn test_grep_finds_matches_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "Hello World\nbye\n").unwrap();
        let mut ctx = ToolContext::new(dir.path());

        let result = GrepTool::new()
            .invoke(args(&[("pattern", json!("hello"))]), &mut ctx)
            .await
            .unwrap();
        let text = result.as_str().unwrap();
        assert!(text.contains("a.txt:1:Hello World"));
        assert!(!text.contains("bye"));
    }

    #[tokio::test]
    async fn test_grep_case_sensitive_no_match() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "Hello\n").unwrap();
        let mut ctx = ToolContext::new(dir.path());

        let result = GrepTool::new()
            .invoke(
                args(&[("pattern", json!("hello")), ("ignore_case", json!(false))]),
                &mut ctx,
            )
            .await
            .unwrap();
        assert_eq!(result, json!("No matches found"));
    }

    #[tokio::test]
    async fn test_grep_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ToolContext::new(dir.path());

        let err = GrepTool::new()
            .invoke(
                args(&[("pattern", json!("x")), ("path", json!("no-such-dir"))]),
                &mut ctx,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, "EXECUTION_FAILED");
    }
}
