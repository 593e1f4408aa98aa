//! Response schema construction
//!
//! Every backend reply must be exactly one structured call. The schema is an
//! `anyOf` with one variant per registered tool, each pinning `call_tool` to
//! that tool's name and `arguments` to its parameter schema.

use serde_json::{Map, Value, json};

pub const THOUGHTS_FIELD: &str = "thoughts";
pub const CALL_TOOL_FIELD: &str = "call_tool";
pub const ARGUMENTS_FIELD: &str = "arguments";

const SCHEMA_DIALECT: &str = "http://json-schema.org/draft-07/schema#";
const SCHEMA_TITLE: &str = "ai_response";

/// Validation schema for structured calls (draft-07 JSON Schema).
///
/// Variant count always equals the number of tools it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    document: Value,
    variants: Vec<(String, Value)>,
    thoughts_required: bool,
}

impl ResponseSchema {
    /// Build from `(tool name, parameter schema)` pairs in registration order
    pub fn build<'a, I>(tools: I, thoughts_required: bool) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let variants: Vec<(String, Value)> = tools
            .into_iter()
            .map(|(name, parameters)| {
                (
                    name.to_string(),
                    variant_schema(name, parameters, thoughts_required),
                )
            })
            .collect();

        let document = json!({
            "$schema": SCHEMA_DIALECT,
            "title": SCHEMA_TITLE,
            "type": "object",
            "anyOf": variants.iter().map(|(_, v)| v.clone()).collect::<Vec<_>>(),
        });

        Self {
            document,
            variants,
            thoughts_required,
        }
    }

    /// Full schema document, as sent to backends that accept one
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn title(&self) -> &'static str {
        SCHEMA_TITLE
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    pub fn variant(&self, tool_name: &str) -> Option<&Value> {
        self.variants
            .iter()
            .find(|(name, _)| name == tool_name)
            .map(|(_, v)| v)
    }

    pub fn variants(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variants.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(name, _)| name.as_str())
    }

    pub fn thoughts_required(&self) -> bool {
        self.thoughts_required
    }
}

fn variant_schema(name: &str, parameters: &Value, thoughts_required: bool) -> Value {
    let mut properties = Map::new();
    properties.insert(THOUGHTS_FIELD.to_string(), json!({"type": "string"}));
    properties.insert(CALL_TOOL_FIELD.to_string(), json!({"const": name}));
    properties.insert(ARGUMENTS_FIELD.to_string(), parameters.clone());

    let mut required = vec![CALL_TOOL_FIELD, ARGUMENTS_FIELD];
    if thoughts_required {
        required.insert(0, THOUGHTS_FIELD);
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
