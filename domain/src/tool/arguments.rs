//! Argument coercion
//!
//! Raw structured-call arguments are JSON; tools receive [`ToolArguments`]
//! whose values have been checked against each parameter's declared
//! [`ParamType`]. Nested objects become [`StructuredArg`] instances carrying
//! their declared type name.

use super::entities::{ParamType, ToolDefinition, ToolParameter};
use super::value_objects::ToolError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A coerced argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Plain(Value),
    Object(StructuredArg),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Plain(v) => v.as_str(),
            ArgValue::Object(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Plain(v) => v.as_i64(),
            ArgValue::Object(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Plain(v) => v.as_bool(),
            ArgValue::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&StructuredArg> {
        match self {
            ArgValue::Object(obj) => Some(obj),
            ArgValue::Plain(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Plain(Value::Null))
    }

    pub fn to_value(&self) -> Value {
        match self {
            ArgValue::Plain(v) => v.clone(),
            ArgValue::Object(obj) => obj.to_value(),
        }
    }
}

/// Instance of a declared object type, built from a nested JSON mapping
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredArg {
    type_name: String,
    fields: BTreeMap<String, ArgValue>,
}

impl StructuredArg {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.fields.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

/// Arguments for one tool invocation, coerced against its definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: BTreeMap<String, ArgValue>,
}

impl ToolArguments {
    /// Coerce raw call arguments against a tool definition.
    ///
    /// Fails with `INVALID_ARGUMENT` on a missing required parameter, an
    /// undeclared parameter, or a value that does not fit its declared type.
    pub fn coerce(definition: &ToolDefinition, raw: &Map<String, Value>) -> Result<Self, ToolError> {
        let values = coerce_fields(&definition.parameters, raw, &definition.name, false)?;
        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_str)
    }

    pub fn require_str(&self, name: &str) -> Result<&str, ToolError> {
        self.get_str(name)
            .ok_or_else(|| ToolError::invalid_argument(format!("Missing required argument: {}", name)))
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ArgValue::as_i64)
    }

    pub fn require_i64(&self, name: &str) -> Result<i64, ToolError> {
        self.get_i64(name)
            .ok_or_else(|| ToolError::invalid_argument(format!("Missing required argument: {}", name)))
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ArgValue::as_bool)
    }

    pub fn get_object(&self, name: &str) -> Option<&StructuredArg> {
        self.get(name).and_then(ArgValue::as_object)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

fn coerce_fields(
    declared: &[ToolParameter],
    raw: &Map<String, Value>,
    owner: &str,
    open: bool,
) -> Result<BTreeMap<String, ArgValue>, ToolError> {
    if let Some(missing) = declared
        .iter()
        .find(|p| p.required && raw.get(&p.name).is_none_or(Value::is_null))
    {
        return Err(ToolError::invalid_argument(format!(
            "Missing required argument '{}' for {}",
            missing.name, owner
        )));
    }

    let mut values = BTreeMap::new();
    for (key, value) in raw {
        let coerced = match declared.iter().find(|p| &p.name == key) {
            Some(param) => coerce_value(param, value, owner)?,
            None if open => ArgValue::Plain(value.clone()),
            None => {
                return Err(ToolError::invalid_argument(format!(
                    "Unexpected argument '{}' for {}",
                    key, owner
                )));
            }
        };
        values.insert(key.clone(), coerced);
    }
    Ok(values)
}

/// `i64` bounds as floats; the upper one is exclusive
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const I64_MAX_F64: f64 = 9_223_372_036_854_775_808.0;

fn out_of_range(param: &ToolParameter, owner: &str, n: &serde_json::Number) -> ToolError {
    ToolError::invalid_argument(format!(
        "Argument '{}' for {} is out of range: {}",
        param.name, owner, n
    ))
}

fn coerce_value(param: &ToolParameter, value: &Value, owner: &str) -> Result<ArgValue, ToolError> {
    if value.is_null() && !param.required {
        return Ok(ArgValue::Plain(Value::Null));
    }

    let mismatch = || {
        ToolError::invalid_argument(format!(
            "Argument '{}' for {} must be of type {}",
            param.name,
            owner,
            param.param_type.json_type()
        ))
    };

    match &param.param_type {
        ParamType::Object(object) => {
            let map = value.as_object().ok_or_else(mismatch)?;
            let fields = coerce_fields(&object.fields, map, &object.type_name, object.is_open())?;
            Ok(ArgValue::Object(StructuredArg {
                type_name: object.type_name.clone(),
                fields,
            }))
        }
        ParamType::Integer => match value {
            Value::Number(n) if n.is_i64() => Ok(ArgValue::Plain(value.clone())),
            Value::Number(n) if n.is_u64() => Err(out_of_range(param, owner, n)),
            // Models frequently emit `3.0` for integer parameters
            Value::Number(n) => match n.as_f64().filter(|f| f.fract() == 0.0) {
                Some(f) if (I64_MIN_F64..I64_MAX_F64).contains(&f) => {
                    Ok(ArgValue::Plain(Value::from(f as i64)))
                }
                Some(_) => Err(out_of_range(param, owner, n)),
                None => Err(mismatch()),
            },
            _ => Err(mismatch()),
        },
        ParamType::Number if value.is_number() => Ok(ArgValue::Plain(value.clone())),
        ParamType::String if value.is_string() => Ok(ArgValue::Plain(value.clone())),
        ParamType::Boolean if value.is_boolean() => Ok(ArgValue::Plain(value.clone())),
        ParamType::Array if value.is_array() => Ok(ArgValue::Plain(value.clone())),
        _ => Err(mismatch()),
    }
}
