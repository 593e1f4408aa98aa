//! Hidden-region redaction
//!
//! Tools can embed operator-only text between [`REDACTION_START`] and
//! [`REDACTION_END`]. Those regions are shown on the console but stripped
//! before the output re-enters history.

use crate::core::error::RedactionError;
use serde_json::Value;

pub const REDACTION_START: &str = "<%%!!>";
pub const REDACTION_END: &str = "</%%!!>";

/// Wrap text in redaction markers
pub fn hidden(text: &str) -> String {
    format!("{REDACTION_START}{text}{REDACTION_END}")
}

/// Remove every marked region, markers included.
///
/// Each start marker is paired with the first end marker after it. A start
/// marker with no end marker is malformed markup.
pub fn redact(text: &str) -> Result<String, RedactionError> {
    let mut out = text.to_string();
    while let Some(start) = out.find(REDACTION_START) {
        let search_from = start + REDACTION_START.len();
        let end = out[search_from..]
            .find(REDACTION_END)
            .map(|offset| search_from + offset + REDACTION_END.len())
            .ok_or(RedactionError::MalformedMarkup { position: start })?;
        out.replace_range(start..end, "");
    }
    Ok(out)
}

/// Redact string values; everything else passes through unchanged
pub fn redact_value(value: Value) -> Result<Value, RedactionError> {
    match value {
        Value::String(s) => Ok(Value::String(redact(&s)?)),
        other => Ok(other),
    }
}
