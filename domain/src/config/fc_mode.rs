//! Function-calling mode value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the backend is asked to constrain its output to a structured call.
///
/// - `JsonSchema`: the full response schema is sent (llama.cpp, tabbyAPI, vLLM)
/// - `JsonMode`: only "some JSON object" is requested (OpenAI, Groq, Together)
/// - `None`: no constraint; the extractor and validator do all the work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionCallingMode {
    #[default]
    JsonSchema,
    JsonMode,
    None,
}

impl FunctionCallingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionCallingMode::JsonSchema => "json_schema",
            FunctionCallingMode::JsonMode => "json_mode",
            FunctionCallingMode::None => "none",
        }
    }
}

impl fmt::Display for FunctionCallingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionCallingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json_schema" => Ok(FunctionCallingMode::JsonSchema),
            "json_mode" => Ok(FunctionCallingMode::JsonMode),
            "none" => Ok(FunctionCallingMode::None),
            other => Err(format!(
                "unknown function calling mode '{}' (expected json_schema, json_mode or none)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_json_schema() {
        assert_eq!(FunctionCallingMode::default(), FunctionCallingMode::JsonSchema);
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&FunctionCallingMode::JsonMode).unwrap();
        assert_eq!(json, "\"json_mode\"");
    }

    #[test]
    fn test_from_str_roundtrips_display() {
        for mode in [
            FunctionCallingMode::JsonSchema,
            FunctionCallingMode::JsonMode,
            FunctionCallingMode::None,
        ] {
            assert_eq!(mode.to_string().parse::<FunctionCallingMode>(), Ok(mode));
        }
        assert!("xml".parse::<FunctionCallingMode>().is_err());
    }
}
