//! Tool domain value objects: errors raised by tools and the outcomes the
//! loop feeds back into history.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error raised by a tool invocation.
///
/// Tool errors never abort a conversation: the loop turns them into an error
/// [`ToolOutcome`] that the model sees on its next turn.
///
/// | Code | Description |
/// |------|-------------|
/// | `INVALID_ARGUMENT` | Missing/wrong parameters, failed coercion |
/// | `NOT_FOUND` | Unknown tool, missing file |
/// | `EXECUTION_FAILED` | Runtime failure (non-zero exit, HTTP error) |
/// | `PERMISSION_DENIED` | Refused by a safety check |
/// | `TIMEOUT` | Operation timed out |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new("PERMISSION_DENIED", message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Result of dispatching one structured call.
///
/// `result` holds the tool's return value on success, or the error text on
/// failure. Either way it ends up wrapped in a tool-output envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub tool_name: String,
    pub result: Value,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToolOutcome {
    pub fn success(tool_name: impl Into<String>, result: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            result,
            is_error: false,
            duration_ms: None,
        }
    }

    pub fn failure(tool_name: impl Into<String>, error: &ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            result: Value::String(error.to_string()),
            is_error: true,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_success(&self) -> bool {
        !self.is_error
    }

    /// Result as display text: strings verbatim, everything else as JSON
    pub fn text(&self) -> String {
        match &self.result {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_error_display() {
        let error = ToolError::not_found("notes.txt").with_details("cwd=/tmp");
        assert_eq!(error.to_string(), "[NOT_FOUND] Resource not found: notes.txt (cwd=/tmp)");
    }

    #[test]
    fn test_failure_outcome_carries_error_text() {
        let outcome = ToolOutcome::failure("exec_shell_cmd", &ToolError::timeout("sleep 100"));
        assert!(outcome.is_error);
        assert_eq!(outcome.text(), "[TIMEOUT] Operation timed out: sleep 100");
    }

    #[test]
    fn test_success_outcome_text() {
        let outcome = ToolOutcome::success("raw_http_request", json!({"status_code": 200}))
            .with_duration(12);
        assert!(outcome.is_success());
        assert_eq!(outcome.text(), r#"{"status_code":200}"#);
        assert_eq!(outcome.duration_ms, Some(12));
    }
}
