//! Agent progress port.
//!
//! [`AgentProgressNotifier`] is an **output port** the presentation layer
//! implements to show what the loop is doing while a query is in flight.
//!
//! All methods have default no-op implementations, so implementers only
//! need to override the callbacks they care about.

use tooloop_domain::{StructuredCall, ToolOutcome};

pub trait AgentProgressNotifier: Send + Sync {
    /// A completion request is about to be sent
    fn on_backend_request(&self, _attempt: usize, _max_attempts: usize) {}

    /// The backend answered (valid or not)
    fn on_backend_response(&self) {}

    /// A reply could not be turned into a valid structured call
    fn on_attempt_failed(&self, _attempt: usize, _max_attempts: usize, _reason: &str) {}

    /// A valid structured call was accepted
    fn on_structured_call(&self, _call: &StructuredCall) {}

    /// A tool is about to be invoked
    fn on_tool_call(&self, _tool_name: &str, _args: &str) {}

    /// A tool returned. `outcome` is the unredacted result.
    fn on_tool_result(&self, _tool_name: &str, _outcome: &ToolOutcome) {}
}

/// No-op implementation of AgentProgressNotifier
pub struct NoAgentProgress;

impl AgentProgressNotifier for NoAgentProgress {}
