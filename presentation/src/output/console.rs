//! Console output for agent turns and tool listings

use colored::Colorize;
use serde_json::Value;
use tooloop_application::TurnOutcome;

/// Formats agent output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Text shown to the user at the end of a turn
    pub fn format_outcome(outcome: &TurnOutcome) -> String {
        match outcome {
            TurnOutcome::Delivered { message, .. } => message.clone(),
            TurnOutcome::Stopped { call, reason } => format!(
                "{} {} ({})\n{}",
                "Stopped:".yellow().bold(),
                call.call_tool,
                reason,
                Self::colorize_json(&Self::call_value(call))
            ),
            TurnOutcome::Truncated { call, dispatches } => format!(
                "{} gave up after {} tool calls without an answer; last call:\n{}",
                "Truncated:".yellow().bold(),
                dispatches,
                Self::colorize_json(&Self::call_value(call))
            ),
        }
    }

    /// One `--list-tools` entry: the name, then its schema
    pub fn format_tool_listing(name: &str, schema: &Value) -> String {
        format!("{}\n{}\n", name.cyan().bold(), Self::colorize_json(schema))
    }

    /// Error line for a failed query
    pub fn format_error(error: &dyn std::error::Error) -> String {
        format!("{} {}", "Error:".red().bold(), error)
    }

    fn call_value(call: &tooloop_domain::StructuredCall) -> Value {
        serde_json::to_value(call).unwrap_or(Value::Null)
    }

    /// Pretty-print JSON with colored keys and scalars
    pub fn colorize_json(value: &Value) -> String {
        let mut out = String::new();
        Self::write_json(value, 0, &mut out);
        out
    }

    fn write_json(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent + 1);
        let close_pad = "  ".repeat(indent);

        match value {
            Value::Object(map) if !map.is_empty() => {
                out.push_str("{\n");
                for (i, (key, v)) in map.iter().enumerate() {
                    out.push_str(&pad);
                    out.push_str(&format!("{}", quote(key).blue()));
                    out.push_str(": ");
                    Self::write_json(v, indent + 1, out);
                    if i + 1 < map.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                out.push_str(&close_pad);
                out.push('}');
            }
            Value::Array(items) if !items.is_empty() => {
                out.push_str("[\n");
                for (i, v) in items.iter().enumerate() {
                    out.push_str(&pad);
                    Self::write_json(v, indent + 1, out);
                    if i + 1 < items.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                out.push_str(&close_pad);
                out.push(']');
            }
            Value::Object(_) => out.push_str("{}"),
            Value::Array(_) => out.push_str("[]"),
            Value::String(s) => out.push_str(&format!("{}", quote(s).green())),
            Value::Number(n) => out.push_str(&format!("{}", n.to_string().yellow())),
            Value::Bool(b) => out.push_str(&format!("{}", b.to_string().magenta())),
            Value::Null => out.push_str(&format!("{}", "null".dimmed())),
        }
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
