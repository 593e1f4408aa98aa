//! Structural validation of candidate calls
//!
//! The full `anyOf` document decides validity. When it rejects a candidate,
//! a cheap structural pass plus the matching variant's errors produce a
//! reason the logs (and eventually the operator) can act on.

use super::schema::{ARGUMENTS_FIELD, CALL_TOOL_FIELD, ResponseSchema, THOUGHTS_FIELD};
use crate::core::error::RegistryError;
use jsonschema::Validator;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Why a candidate object is not an acceptable structured call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("field '{field}' must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("arguments for '{tool}' do not match its schema: {reason}")]
    ArgumentMismatch { tool: String, reason: String },
}

/// Validator compiled once per [`ResponseSchema`]
pub struct ResponseValidator {
    document: Validator,
    variants: HashMap<String, Validator>,
    thoughts_required: bool,
}

impl std::fmt::Debug for ResponseValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseValidator")
            .field("variants", &self.variants.keys().collect::<Vec<_>>())
            .field("thoughts_required", &self.thoughts_required)
            .finish()
    }
}

impl ResponseValidator {
    pub fn new(schema: &ResponseSchema) -> Result<Self, RegistryError> {
        if schema.variant_count() == 0 {
            return Err(RegistryError::InvalidSchema(
                "no tools registered, the response schema would accept nothing".to_string(),
            ));
        }
        let document = compile(schema.document())?;
        let variants = schema
            .variants()
            .map(|(name, variant)| Ok((name.to_string(), compile(variant)?)))
            .collect::<Result<HashMap<_, _>, RegistryError>>()?;

        Ok(Self {
            document,
            variants,
            thoughts_required: schema.thoughts_required(),
        })
    }

    pub fn validate(&self, candidate: &Value) -> Result<(), ValidationFailure> {
        if self.document.is_valid(candidate) {
            return Ok(());
        }
        Err(self.explain(candidate))
    }

    fn explain(&self, candidate: &Value) -> ValidationFailure {
        let Some(object) = candidate.as_object() else {
            return ValidationFailure::NotAnObject;
        };

        let tool = match object.get(CALL_TOOL_FIELD) {
            None => return ValidationFailure::MissingField(CALL_TOOL_FIELD),
            Some(Value::String(tool)) => tool,
            Some(_) => {
                return ValidationFailure::WrongType {
                    field: CALL_TOOL_FIELD,
                    expected: "string",
                };
            }
        };
        let Some(variant) = self.variants.get(tool) else {
            return ValidationFailure::UnknownTool(tool.clone());
        };

        if !object.contains_key(ARGUMENTS_FIELD) {
            return ValidationFailure::MissingField(ARGUMENTS_FIELD);
        }
        match object.get(THOUGHTS_FIELD) {
            None if self.thoughts_required => return ValidationFailure::MissingField(THOUGHTS_FIELD),
            Some(thoughts) if !thoughts.is_string() => {
                return ValidationFailure::WrongType {
                    field: THOUGHTS_FIELD,
                    expected: "string",
                };
            }
            _ => {}
        }

        let reason = variant
            .iter_errors(candidate)
            .map(|e| format!("{} at '{}'", e, e.instance_path))
            .collect::<Vec<_>>()
            .join("; ");
        ValidationFailure::ArgumentMismatch {
            tool: tool.clone(),
            reason,
        }
    }
}

fn compile(schema: &Value) -> Result<Validator, RegistryError> {
    Validator::new(schema).map_err(|e| RegistryError::InvalidSchema(e.to_string()))
}
