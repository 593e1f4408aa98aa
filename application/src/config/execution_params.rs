//! Execution parameters: orchestration loop control.
//!
//! [`ExecutionParams`] groups the static parameters that control one
//! [`AgentSession`](crate::use_cases::run_agent::AgentSession): retry and
//! dispatch bounds, schema strictness, and how tool output is wrapped.

use serde::{Deserialize, Serialize};
use tooloop_domain::{EnvelopeOptions, FunctionCallingMode};

/// Orchestration loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Completion attempts per structured call before giving up.
    pub max_retries: usize,
    /// Tool dispatches allowed per user query.
    pub max_iterations: usize,
    /// Whether every call must carry a `thoughts` field.
    pub thoughts_required: bool,
    /// Whether non-terminal calls are executed at all.
    pub tool_calls_allowed: bool,
    /// How the backend is constrained to emit structured calls.
    pub fc_mode: FunctionCallingMode,
    /// Tool-output envelope rendering.
    pub envelope: EnvelopeOptions,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_retries: 5,
            max_iterations: 3,
            thoughts_required: true,
            tool_calls_allowed: true,
            fc_mode: FunctionCallingMode::default(),
            envelope: EnvelopeOptions::default(),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_retries(mut self, max: usize) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_thoughts_required(mut self, required: bool) -> Self {
        self.thoughts_required = required;
        self
    }

    pub fn with_tool_calls_allowed(mut self, allowed: bool) -> Self {
        self.tool_calls_allowed = allowed;
        self
    }

    pub fn with_fc_mode(mut self, mode: FunctionCallingMode) -> Self {
        self.fc_mode = mode;
        self
    }

    pub fn with_envelope(mut self, envelope: EnvelopeOptions) -> Self {
        self.envelope = envelope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_retries, 5);
        assert_eq!(params.max_iterations, 3);
        assert!(params.thoughts_required);
        assert!(params.tool_calls_allowed);
        assert_eq!(params.fc_mode, FunctionCallingMode::JsonSchema);
        assert!(params.envelope.avoid_json_for_str);
        assert!(params.envelope.invisible_hint);
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_max_retries(2)
            .with_max_iterations(7)
            .with_tool_calls_allowed(false)
            .with_fc_mode(FunctionCallingMode::JsonMode);

        assert_eq!(params.max_retries, 2);
        assert_eq!(params.max_iterations, 7);
        assert!(!params.tool_calls_allowed);
        assert_eq!(params.fc_mode, FunctionCallingMode::JsonMode);
    }
}
