//! Structured call handling
//!
//! The path from raw backend text to a history-ready tool result:
//!
//! 1. [`extract`]: recover a JSON object from free-form text
//! 2. [`schema`] / [`validator`]: check it is a call to a registered tool
//! 3. [`redaction`]: strip operator-only regions from tool output
//! 4. [`envelope`]: wrap the outcome for the next backend turn

pub mod envelope;
pub mod extract;
pub mod redaction;
pub mod schema;
pub mod validator;

pub use envelope::{EnvelopeOptions, format_tool_output};
pub use extract::{ExtractedObject, ParseTier, extract_json_object};
pub use redaction::{REDACTION_END, REDACTION_START, hidden, redact, redact_value};
pub use schema::{ARGUMENTS_FIELD, CALL_TOOL_FIELD, ResponseSchema, THOUGHTS_FIELD};
pub use validator::{ResponseValidator, ValidationFailure};
