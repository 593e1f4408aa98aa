//! Type definitions for the RunAgent use case.

use crate::ports::llm_gateway::GatewayError;
use std::fmt;
use thiserror::Error;
use tooloop_domain::{RedactionError, RegistryError, StructuredCall};

/// Errors that end a query (or prevent a session from starting)
#[derive(Error, Debug)]
pub enum RunAgentError {
    #[error("Backend produced no valid structured call after {attempts} attempts")]
    FormatFailure { attempts: usize },

    #[error("Backend error: {0}")]
    Backend(#[from] GatewayError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Redaction(#[from] RedactionError),
}

impl RunAgentError {
    /// Whether the session can keep taking queries after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RunAgentError::FormatFailure { .. } | RunAgentError::Backend(_)
        )
    }
}

/// Why a turn ended without delivering a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The call named a tool that is not registered
    UnknownTool,
    /// Tool dispatch is switched off for this session
    DispatchDisallowed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::UnknownTool => write!(f, "unknown tool"),
            StopReason::DispatchDisallowed => write!(f, "tool calls not allowed"),
        }
    }
}

/// How a single query ended
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The terminal tool was called; `message` is for the user
    Delivered {
        message: String,
        call: StructuredCall,
    },
    /// The call was not dispatched and is the de facto answer
    Stopped {
        call: StructuredCall,
        reason: StopReason,
    },
    /// The dispatch bound was hit before the terminal tool was called
    Truncated {
        call: StructuredCall,
        dispatches: usize,
    },
}

impl TurnOutcome {
    /// The last structured call of the turn
    pub fn call(&self) -> &StructuredCall {
        match self {
            TurnOutcome::Delivered { call, .. }
            | TurnOutcome::Stopped { call, .. }
            | TurnOutcome::Truncated { call, .. } => call,
        }
    }

    pub fn delivered_message(&self) -> Option<&str> {
        match self {
            TurnOutcome::Delivered { message, .. } => Some(message),
            _ => None,
        }
    }

    pub(super) fn event_type(&self) -> &'static str {
        match self {
            TurnOutcome::Delivered { .. } => "delivered",
            TurnOutcome::Stopped { .. } => "stopped",
            TurnOutcome::Truncated { .. } => "truncated",
        }
    }
}

/// What the loop will do with an accepted structured call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDisposition {
    Deliver,
    Dispatch,
    Stop(StopReason),
}

/// Loop state, observable between and during queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// No query in flight
    #[default]
    Idle,
    AwaitingStructuredCall,
    Dispatching,
    Delivering,
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_failure_names_attempts() {
        let err = RunAgentError::FormatFailure { attempts: 5 };
        assert_eq!(
            err.to_string(),
            "Backend produced no valid structured call after 5 attempts"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_registry_error_is_fatal() {
        let err: RunAgentError = RegistryError::DuplicateTool("grep".into()).into();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_outcome_accessors() {
        let call = StructuredCall::new("send_message").with_arg("message", "hi");
        let outcome = TurnOutcome::Delivered {
            message: "hi".into(),
            call: call.clone(),
        };
        assert_eq!(outcome.call(), &call);
        assert_eq!(outcome.delivered_message(), Some("hi"));
        assert_eq!(outcome.event_type(), "delivered");

        let stopped = TurnOutcome::Stopped {
            call,
            reason: StopReason::UnknownTool,
        };
        assert_eq!(stopped.delivered_message(), None);
        assert_eq!(StopReason::DispatchDisallowed.to_string(), "tool calls not allowed");
    }
}
