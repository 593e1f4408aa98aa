//! Tool-output envelope
//!
//! Tool results go back to the model as a user turn wrapped in pseudo-XML so
//! it can tell environment output apart from what the human typed.

use crate::tool::value_objects::ToolOutcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TAG_SEPARATOR: &str = "\n";

/// Envelope rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeOptions {
    /// Mark the envelope as not visible to the user
    pub invisible_hint: bool,
    /// Embed string results raw instead of as JSON string literals
    pub avoid_json_for_str: bool,
}

impl Default for EnvelopeOptions {
    fn default() -> Self {
        Self {
            invisible_hint: true,
            avoid_json_for_str: true,
        }
    }
}

/// Render a (redacted) outcome as the message appended to history
pub fn format_tool_output(outcome: &ToolOutcome, options: &EnvelopeOptions) -> String {
    let hints = if options.invisible_hint {
        r#" invisible-to-user="true""#
    } else {
        ""
    };
    let error = if outcome.is_error { r#" error="true""# } else { "" };
    let payload = match &outcome.result {
        Value::String(s) if options.avoid_json_for_str => s.clone(),
        other => other.to_string(),
    };

    let sep = TAG_SEPARATOR;
    format!("<system{hints}>{sep}<tool-output{error}>{sep}{payload}{sep}</tool-output>{sep}</system>")
}
