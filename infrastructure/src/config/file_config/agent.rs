//! Agent configuration from TOML (`[agent]` section)

use serde::{Deserialize, Serialize};
use tooloop_application::ExecutionParams;
use tooloop_domain::{EnvelopeOptions, FunctionCallingMode};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// name = "tooluse"                 # "tooluse" or "tooluse_min"
/// toolset = "default"              # "basic", "webgpt", "shell", "all", "default"
/// exclude = ["browse_url"]         # removed after toolset expansion
/// fc_mode = "json_schema"          # "json_schema", "json_mode", "none"
/// max_retries = 5
/// max_iterations = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Agent preset name
    pub name: String,
    /// Named toolset
    pub toolset: String,
    /// Extra tool names to exclude from the toolset
    pub exclude: Vec<String>,
    /// How output structure is requested from the backend
    pub fc_mode: FunctionCallingMode,
    /// Backend attempts per structured call
    pub max_retries: usize,
    /// Tool dispatches per user query
    pub max_iterations: usize,
    /// Require the `thoughts` field in every call
    pub thoughts_required: bool,
    /// Dispatch non-terminal tools at all
    pub tool_calls_allowed: bool,
    /// Embed string tool results without JSON quoting
    pub avoid_json_for_str_ret: bool,
    /// Mark tool output as invisible to the user
    pub invisible_hint: bool,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            name: "tooluse".to_string(),
            toolset: "default".to_string(),
            exclude: Vec::new(),
            fc_mode: params.fc_mode,
            max_retries: params.max_retries,
            max_iterations: params.max_iterations,
            thoughts_required: params.thoughts_required,
            tool_calls_allowed: params.tool_calls_allowed,
            avoid_json_for_str_ret: params.envelope.avoid_json_for_str,
            invisible_hint: params.envelope.invisible_hint,
        }
    }
}

impl FileAgentConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_fc_mode(self.fc_mode)
            .with_max_retries(self.max_retries)
            .with_max_iterations(self.max_iterations)
            .with_thoughts_required(self.thoughts_required)
            .with_tool_calls_allowed(self.tool_calls_allowed)
            .with_envelope(EnvelopeOptions {
                invisible_hint: self.invisible_hint,
                avoid_json_for_str: self.avoid_json_for_str_ret,
            })
    }
}
