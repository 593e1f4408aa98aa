//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the terminal tool.
///
/// A structured call naming this tool ends the turn: its `message` argument is
/// delivered to the user and nothing is executed.
pub const TERMINAL_TOOL: &str = "send_message";

/// Statically declared type of a tool parameter.
///
/// Drives both JSON schema generation and argument coercion; nested
/// [`ParamType::Object`] parameters are coerced into structured instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object(ObjectType),
}

impl ParamType {
    /// JSON schema `type` keyword for this parameter
    pub fn json_type(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object(_) => "object",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            ParamType::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Declared shape of an object-typed parameter.
///
/// An object type without fields is an open mapping: any keys are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    pub type_name: String,
    pub fields: Vec<ToolParameter>,
}

impl ObjectType {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: ToolParameter) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&ToolParameter> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_open(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Definition of a tool that can be called by the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "exec_shell_cmd")
    pub name: String,
    /// Human-readable description, shown to the model
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub param_type: ParamType,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn is_terminal(&self) -> bool {
        self.name == TERMINAL_TOOL
    }
}

impl ToolParameter {
    /// New string parameter; use [`with_type`](Self::with_type) for other types
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }
}

/// A structured call decoded from backend output.
///
/// Field order matters: it is serialized back into history as the assistant
/// turn, so the model sees its own calls in the same shape it produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredCall {
    /// Free-form reasoning emitted before the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thoughts: Option<String>,
    /// Name of the tool to call
    pub call_tool: String,
    /// Raw arguments, coerced against the tool's parameters at dispatch
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl StructuredCall {
    pub fn new(call_tool: impl Into<String>) -> Self {
        Self {
            thoughts: None,
            call_tool: call_tool.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_thoughts(mut self, thoughts: impl Into<String>) -> Self {
        self.thoughts = Some(thoughts.into());
        self
    }

    /// Decode an already-validated JSON object
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn to_json(&self) -> String {
        // Serializing a struct of strings and JSON values cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn is_terminal(&self) -> bool {
        self.call_tool == TERMINAL_TOOL
    }

    /// The `message` argument of a terminal call
    pub fn message(&self) -> Option<&str> {
        self.arguments.get("message").and_then(|v| v.as_str())
    }
}
