//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`]. The same parameter schema is
//! embedded in the system prompt and in the response schema's `arguments`
//! slot, so the model is told and constrained by one description.

use serde_json::{Map, Value, json};
use tooloop_application::ports::tool_schema::ToolSchemaPort;
use tooloop_domain::tool::{ParamType, ToolDefinition, ToolParameter};

/// Default implementation producing JSON Schema from declared parameter types.
///
/// - scalar types map to their JSON Schema `type`
/// - object parameters with fields become nested closed objects titled with
///   their type name
/// - object parameters without fields become open objects
pub struct JsonSchemaToolConverter;

fn object_schema(params: &[ToolParameter]) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in params {
        properties.insert(param.name.clone(), parameter_schema(param));
        if param.required {
            required.push(json!(param.name));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert("required".to_string(), Value::Array(required));
    schema.insert("additionalProperties".to_string(), json!(false));
    schema
}

fn parameter_schema(param: &ToolParameter) -> Value {
    match &param.param_type {
        ParamType::Object(object) if object.is_open() => json!({
            "type": "object",
            "title": object.type_name,
            "description": param.description,
            "additionalProperties": true,
        }),
        ParamType::Object(object) => {
            let mut schema = object_schema(&object.fields);
            schema.insert("title".to_string(), json!(object.type_name));
            schema.insert("description".to_string(), json!(param.description));
            Value::Object(schema)
        }
        other => json!({
            "type": other.json_type(),
            "description": param.description,
        }),
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({
            "name": tool.name,
            "description": tool.description,
            "parameters": self.parameters_schema(tool),
        })
    }

    fn parameters_schema(&self, tool: &ToolDefinition) -> Value {
        Value::Object(object_schema(&tool.parameters))
    }
}
