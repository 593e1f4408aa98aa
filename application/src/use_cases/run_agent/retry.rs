//! Bounded retry protocol for malformed backend output.
//!
//! Each attempt sends the unmodified history. Output that cannot be turned
//! into a valid structured call is logged and discarded; transport errors are
//! not retried.

use super::types::RunAgentError;
use crate::ports::agent_progress::AgentProgressNotifier;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{LlmGateway, StructuralHint};
use serde_json::json;
use tooloop_domain::util::clip_output;
use tooloop_domain::{Message, ResponseValidator, StructuredCall, extract_json_object};
use tracing::{debug, warn};

/// Longest backend reply copied into a failure log entry
const MAX_LOGGED_RESPONSE_BYTES: usize = 2000;

pub(super) struct StructuredCallRequest<'a> {
    pub gateway: &'a dyn LlmGateway,
    pub validator: &'a ResponseValidator,
    pub hint: StructuralHint<'a>,
    pub max_attempts: usize,
    pub progress: &'a dyn AgentProgressNotifier,
    pub logger: &'a dyn ConversationLogger,
}

impl StructuredCallRequest<'_> {
    pub async fn run(&self, messages: &[Message]) -> Result<StructuredCall, RunAgentError> {
        for attempt in 1..=self.max_attempts {
            self.progress.on_backend_request(attempt, self.max_attempts);
            let response = self.gateway.complete(messages, self.hint).await;
            self.progress.on_backend_response();
            let text = response?;

            let reason = match self.accept(&text) {
                Ok(call) => return Ok(call),
                Err(reason) => reason,
            };

            warn!(
                attempt,
                max_attempts = self.max_attempts,
                reason = %reason,
                "Backend output rejected"
            );
            self.progress
                .on_attempt_failed(attempt, self.max_attempts, &reason);
            self.logger.log(ConversationEvent::new(
                "llm_attempt_failed",
                json!({
                    "attempt": attempt,
                    "reason": reason,
                    "response": clip_output(&text, MAX_LOGGED_RESPONSE_BYTES),
                }),
            ));
        }

        Err(RunAgentError::FormatFailure {
            attempts: self.max_attempts,
        })
    }

    fn accept(&self, text: &str) -> Result<StructuredCall, String> {
        let extracted = extract_json_object(text)
            .ok_or_else(|| "no JSON object found in response".to_string())?;
        let tier = extracted.tier;
        let value = extracted.into_value();

        self.validator.validate(&value).map_err(|f| f.to_string())?;
        let call = StructuredCall::from_value(value).map_err(|e| e.to_string())?;
        debug!(tool = %call.call_tool, tier = tier.as_str(), "Accepted structured call");
        Ok(call)
    }
}
