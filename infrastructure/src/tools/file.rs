//! File tools: read_from_text_file, append_to_text_file

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tooloop_domain::tool::{
    ParamType, Tool, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolParameter,
};
use tracing::debug;

/// Tool name constants
pub const READ_FROM_TEXT_FILE: &str = "read_from_text_file";
pub const APPEND_TO_TEXT_FILE: &str = "append_to_text_file";

/// Maximum number of characters returned by a single read
pub const MAX_READ_CHARS: usize = 500;

/// Get the tool definition for read_from_text_file
pub fn read_from_text_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FROM_TEXT_FILE,
        "Reads lines from a text file, starting at a 1-based line number.",
    )
    .with_parameter(ToolParameter::new("filename", "Path to the file to read", true))
    .with_parameter(
        ToolParameter::new("line_start", "First line to read, 1-based (default: 1)", false)
            .with_type(ParamType::Integer),
    )
    .with_parameter(
        ToolParameter::new("num_lines", "Number of lines to read (default: 1)", false)
            .with_type(ParamType::Integer),
    )
}

/// Get the tool definition for append_to_text_file
pub fn append_to_text_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        APPEND_TO_TEXT_FILE,
        "Appends a line of text to an existing text file.",
    )
    .with_parameter(ToolParameter::new("filename", "Path to the file to append to", true))
    .with_parameter(ToolParameter::new("content", "Text to append", true))
}

/// Select `num_lines` lines starting at `line_start`, capped at [`MAX_READ_CHARS`]
pub fn read_lines(content: &str, line_start: usize, num_lines: usize) -> String {
    let mut lines = Vec::new();
    let mut chars_read = 0;

    for (idx, line) in content.split_inclusive('\n').enumerate() {
        let line_number = idx + 1;
        if line_number < line_start {
            continue;
        }
        if line_number >= line_start + num_lines {
            break;
        }

        let len = line.chars().count();
        if chars_read + len > MAX_READ_CHARS {
            let partial: String = line.chars().take(MAX_READ_CHARS - chars_read).collect();
            lines.push(partial.trim_end_matches('\n').to_string());
            lines.push(format!(
                "[SYSTEM ALERT - max chars ({}) reached during file read]",
                MAX_READ_CHARS
            ));
            break;
        }

        chars_read += len;
        lines.push(line.trim_end_matches('\n').to_string());
    }

    lines.join("\n")
}

fn positive(args: &ToolArguments, name: &str) -> Result<usize, ToolError> {
    let value = args.get_i64(name).unwrap_or(1);
    if value < 1 {
        return Err(ToolError::invalid_argument(format!(
            "{} must be a positive integer, got {}",
            name, value
        )));
    }
    Ok(value as usize)
}

pub struct ReadFromTextFileTool {
    definition: ToolDefinition,
}

impl ReadFromTextFileTool {
    pub fn new() -> Self {
        Self {
            definition: read_from_text_file_definition(),
        }
    }
}

impl Default for ReadFromTextFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReadFromTextFileTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, args: ToolArguments, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let filename = args.require_str("filename")?;
        let line_start = positive(&args, "line_start")?;
        let num_lines = positive(&args, "num_lines")?;

        let path = ctx.resolve_path(filename);
        if !path.is_file() {
            return Err(ToolError::not_found(format!(
                "The file '{}' does not exist",
                filename
            )));
        }

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ToolError::execution_failed(format!("Failed to read file '{}': {}", filename, e))
        })?;

        debug!(path = %path.display(), line_start, num_lines, "Reading text file");
        Ok(Value::String(read_lines(&content, line_start, num_lines)))
    }
}

pub struct AppendToTextFileTool {
    definition: ToolDefinition,
}

impl AppendToTextFileTool {
    pub fn new() -> Self {
        Self {
            definition: append_to_text_file_definition(),
        }
    }
}

impl Default for AppendToTextFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for AppendToTextFileTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, args: ToolArguments, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let filename = args.require_str("filename")?;
        let content = args.require_str("content")?;

        let path = ctx.resolve_path(filename);
        if !path.is_file() {
            return Err(ToolError::not_found(format!(
                "The file '{}' does not exist",
                filename
            )));
        }

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .await
            .map_err(|e| {
                ToolError::execution_failed(format!("Failed to open '{}': {}", filename, e))
            })?;

        let line = format!("{}\n", content);
        file.write_all(line.as_bytes()).await.map_err(|e| {
            ToolError::execution_failed(format!("Failed to write '{}': {}", filename, e))
        })?;
        file.flush().await.map_err(|e| {
            ToolError::execution_failed(format!("Failed to write '{}': {}", filename, e))
        })?;

        debug!(path = %path.display(), bytes = line.len(), "Appended to text file");
        Ok(Value::Null)
    }
}
