//! Structured output extraction
//!
//! Models wrap their JSON in prose, code fences, or slightly-off JSON5. The
//! extractor takes the outermost `{ ... }` span and tries a strict parse,
//! then a lenient one.

use serde_json::{Map, Value};

/// Which parser recovered the object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    /// Plain JSON
    Strict,
    /// JSON5: unquoted keys, trailing commas, single quotes
    Lenient,
}

impl ParseTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseTier::Strict => "strict",
            ParseTier::Lenient => "lenient",
        }
    }
}

/// An object recovered from backend text
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedObject {
    pub object: Map<String, Value>,
    pub tier: ParseTier,
}

impl ExtractedObject {
    pub fn into_value(self) -> Value {
        Value::Object(self.object)
    }
}

/// Recover a JSON object from arbitrary text.
///
/// Returns `None` when there are no braces, the span does not parse under
/// either tier, or the parsed value is not an object. Not finding an object
/// is an expected result, not an error.
pub fn extract_json_object(text: &str) -> Option<ExtractedObject> {
    let span = candidate_span(text)?;

    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(span) {
        return Some(ExtractedObject {
            object,
            tier: ParseTier::Strict,
        });
    }

    match json5::from_str::<Value>(span) {
        Ok(Value::Object(object)) => Some(ExtractedObject {
            object,
            tier: ParseTier::Lenient,
        }),
        _ => None,
    }
}

/// First `{` through last `}` of the trimmed text, inclusive
fn candidate_span(text: &str) -> Option<&str> {
    let text = text.trim();
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_object_from_prose() {
        let text = r#"Sure! Here is my answer: {"call_tool": "send_message", "arguments": {"message": "hi"}} Hope that helps."#;
        let extracted = extract_json_object(text).unwrap();
        assert_eq!(extracted.tier, ParseTier::Strict);
        assert_eq!(extracted.object["call_tool"], "send_message");
        assert_eq!(extracted.object["arguments"]["message"], "hi");
    }

    #[test]
    fn test_recovers_from_code_fence() {
        let text = "```json\n{\"call_tool\": \"grep\", \"arguments\": {}}\n```";
        assert_eq!(extract_json_object(text).unwrap().object["call_tool"], "grep");
    }

    #[test]
    fn test_trailing_comma_and_unquoted_keys_use_lenient_tier() {
        let text = r#"{call_tool: "send_message", arguments: {message: 'hello',},}"#;
        assert!(serde_json::from_str::<Value>(text).is_err());

        let lenient = extract_json_object(text).unwrap();
        assert_eq!(lenient.tier, ParseTier::Lenient);

        let strict = extract_json_object(
            r#"{"call_tool": "send_message", "arguments": {"message": "hello"}}"#,
        )
        .unwrap();
        assert_eq!(lenient.object, strict.object);
    }

    #[test]
    fn test_no_braces_is_none() {
        assert!(extract_json_object("I will just answer in prose.").is_none());
        assert!(extract_json_object("").is_none());
    }

    #[test]
    fn test_reversed_braces_is_none() {
        assert!(extract_json_object("} oops {").is_none());
    }

    #[test]
    fn test_unparseable_span_is_none() {
        assert!(extract_json_object("{ this is {not} json at all ").is_none());
        assert!(extract_json_object("{call_tool: }").is_none());
    }

    #[test]
    fn test_span_between_first_and_last_brace() {
        let text = "a {\"x\": {\"y\": 1}} b";
        assert_eq!(candidate_span(text), Some("{\"x\": {\"y\": 1}}"));
    }
}
