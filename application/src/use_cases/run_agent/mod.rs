//! Run Agent use case
//!
//! [`AgentSession`] owns one conversation: its history, its tool context and
//! the orchestration loop that turns each user query into a [`TurnOutcome`].
//!
//! ```text
//!  query ──▶ AwaitingStructuredCall ──(retry protocol)──▶ call appended
//!                   ▲                                         │
//!                   │                           ┌─────────────┼──────────────┐
//!                   │                           ▼             ▼              ▼
//!             tool output ◀── Dispatching    Delivering    Stopped      Truncated
//!             (redacted,                   (send_message) (unknown /   (dispatch
//!              enveloped)                                  disallowed)   bound)
//! ```
//!
//! Every backend call and tool invocation is awaited before the next step.

mod retry;
mod types;

pub use types::{CallDisposition, LoopState, RunAgentError, StopReason, TurnOutcome};

use crate::config::{AgentPreset, ExecutionParams};
use crate::ports::agent_progress::AgentProgressNotifier;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::{LlmGateway, StructuralHint};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use retry::StructuredCallRequest;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use tooloop_domain::{
    AgentPromptTemplate, History, RegistryError, ResponseSchema, ResponseValidator,
    StructuredCall, ToolContext, ToolOutcome, format_tool_output, redact_value,
};
use tracing::{debug, info, warn};

/// Transforms raw user input before it is appended to history
pub type InputFormatter = Box<dyn Fn(&str) -> String + Send + Sync>;

/// One agent conversation
pub struct AgentSession {
    gateway: Arc<dyn LlmGateway>,
    tools: Arc<dyn ToolExecutorPort>,
    logger: Arc<dyn ConversationLogger>,
    params: ExecutionParams,
    schema: ResponseSchema,
    validator: ResponseValidator,
    history: History,
    context: ToolContext,
    input_formatter: InputFormatter,
    state: LoopState,
}

impl AgentSession {
    /// Build the response schema from the registered tools and bootstrap the
    /// history with the preset's system prompt and opening message.
    ///
    /// `thoughts` is only required when the preset's prompt asks for it.
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tools: Arc<dyn ToolExecutorPort>,
        schema_port: &dyn ToolSchemaPort,
        preset: &AgentPreset,
        mut params: ExecutionParams,
        context: ToolContext,
    ) -> Result<Self, RunAgentError> {
        params.thoughts_required &= preset.asks_for_thoughts;
        let (schema, tool_schemas) = {
            let definitions = tools.definitions();
            let mut seen = HashSet::new();
            if let Some(dup) = definitions.iter().find(|d| !seen.insert(d.name.as_str())) {
                return Err(RegistryError::DuplicateTool(dup.name.clone()).into());
            }

            let parameters: Vec<(&str, Value)> = definitions
                .iter()
                .map(|d| (d.name.as_str(), schema_port.parameters_schema(d)))
                .collect();
            let schema = ResponseSchema::build(
                parameters.iter().map(|(name, p)| (*name, p)),
                params.thoughts_required,
            );
            (schema, schema_port.all_tools_schema(&definitions))
        };
        let validator = ResponseValidator::new(&schema)?;

        let system_prompt =
            AgentPromptTemplate::render(preset.style, &preset.assistant_name, &tool_schemas);
        let mut history = History::with_system_prompt(system_prompt);
        if let Some(first) = &preset.first_message {
            history.push_assistant(first.to_json());
        }

        info!(
            backend = gateway.name(),
            agent = %preset.name,
            tools = ?schema.tool_names().collect::<Vec<_>>(),
            fc_mode = %params.fc_mode,
            "Agent session ready"
        );

        Ok(Self {
            gateway,
            tools,
            logger: Arc::new(NoConversationLogger),
            params,
            schema,
            validator,
            history,
            context,
            input_formatter: Box::new(|input: &str| input.to_string()),
            state: LoopState::Idle,
        })
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_input_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.input_formatter = Box::new(formatter);
        self
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    pub fn schema(&self) -> &ResponseSchema {
        &self.schema
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Decide what happens to an accepted call
    ///
    /// Within [`handle_query`](Self::handle_query) the validator already
    /// rejects names missing from the response schema, so `UnknownTool` is
    /// only reached when the executor's `has_tool` disagrees with its
    /// `definitions()`.
    pub fn classify(&self, call: &StructuredCall) -> CallDisposition {
        if call.is_terminal() {
            CallDisposition::Deliver
        } else if !self.tools.has_tool(&call.call_tool) {
            CallDisposition::Stop(StopReason::UnknownTool)
        } else if !self.params.tool_calls_allowed {
            CallDisposition::Stop(StopReason::DispatchDisallowed)
        } else {
            CallDisposition::Dispatch
        }
    }

    /// Run one user query to completion.
    pub async fn handle_query(
        &mut self,
        query: &str,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<TurnOutcome, RunAgentError> {
        let formatted = (self.input_formatter)(query);
        self.logger
            .log(ConversationEvent::new("user_query", json!({ "query": formatted })));
        self.history.push_user(formatted);

        let result = self.run_loop(progress).await;
        match &result {
            Ok(outcome) => {
                self.logger.log(ConversationEvent::new(
                    outcome.event_type(),
                    outcome_payload(outcome),
                ));
            }
            Err(e) => warn!(error = %e, "Query aborted"),
        }
        self.state = LoopState::Idle;
        result
    }

    async fn run_loop(
        &mut self,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<TurnOutcome, RunAgentError> {
        let mut dispatches = 0;

        loop {
            self.state = LoopState::AwaitingStructuredCall;
            let call = self.request_call(progress).await?;
            progress.on_structured_call(&call);
            self.logger.log(ConversationEvent::new(
                "structured_call",
                serde_json::to_value(&call).unwrap_or_default(),
            ));
            self.history.push_assistant(call.to_json());

            match self.classify(&call) {
                CallDisposition::Deliver => {
                    self.state = LoopState::Delivering;
                    let message = match call.message() {
                        Some(message) => message.to_string(),
                        None => {
                            warn!("Terminal call without a message argument");
                            String::new()
                        }
                    };
                    info!(dispatches, "Message delivered");
                    return Ok(TurnOutcome::Delivered { message, call });
                }
                CallDisposition::Stop(reason) => {
                    self.state = LoopState::Stopped;
                    warn!(tool = %call.call_tool, %reason, "Structured call not dispatched");
                    return Ok(TurnOutcome::Stopped { call, reason });
                }
                CallDisposition::Dispatch if dispatches >= self.params.max_iterations => {
                    self.state = LoopState::Stopped;
                    warn!(
                        tool = %call.call_tool,
                        max_iterations = self.params.max_iterations,
                        "Dispatch bound reached, truncating turn"
                    );
                    return Ok(TurnOutcome::Truncated { call, dispatches });
                }
                CallDisposition::Dispatch => {
                    self.dispatch(&call, progress).await?;
                    dispatches += 1;
                }
            }
        }
    }

    async fn request_call(
        &self,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<StructuredCall, RunAgentError> {
        StructuredCallRequest {
            gateway: self.gateway.as_ref(),
            validator: &self.validator,
            hint: StructuralHint::for_mode(self.params.fc_mode, &self.schema),
            max_attempts: self.params.max_retries,
            progress,
            logger: self.logger.as_ref(),
        }
        .run(self.history.messages())
        .await
    }

    /// Execute a registered tool and append its enveloped, redacted output
    /// to history. Returns the redacted outcome.
    pub async fn dispatch(
        &mut self,
        call: &StructuredCall,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<ToolOutcome, RunAgentError> {
        self.state = LoopState::Dispatching;
        let args = Value::Object(call.arguments.clone()).to_string();
        info!(tool = %call.call_tool, "Dispatching tool call");
        debug!(tool = %call.call_tool, %args, "Tool arguments");
        progress.on_tool_call(&call.call_tool, &args);

        let outcome = self.tools.execute(call, &mut self.context).await;
        progress.on_tool_result(&call.call_tool, &outcome);
        if outcome.is_error {
            warn!(tool = %call.call_tool, error = %outcome.text(), "Tool returned an error");
        }

        let outcome = ToolOutcome {
            result: redact_value(outcome.result)?,
            ..outcome
        };
        self.history
            .push_user(format_tool_output(&outcome, &self.params.envelope));
        self.logger.log(ConversationEvent::new(
            "tool_result",
            json!({
                "tool": outcome.tool_name,
                "is_error": outcome.is_error,
                "result": outcome.result,
                "duration_ms": outcome.duration_ms,
            }),
        ));
        Ok(outcome)
    }
}

fn outcome_payload(outcome: &TurnOutcome) -> Value {
    match outcome {
        TurnOutcome::Delivered { message, .. } => json!({ "message": message }),
        TurnOutcome::Stopped { call, reason } => {
            json!({ "tool": call.call_tool, "reason": reason.to_string() })
        }
        TurnOutcome::Truncated { call, dispatches } => {
            json!({ "tool": call.call_tool, "dispatches": dispatches })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::agent_progress::NoAgentProgress;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tooloop_domain::{
        ParamType, RedactionError, Role, ToolDefinition, ToolError, ToolParameter,
    };

    // ==================== Test Mocks ====================

    struct MockGateway {
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
        fallback: Option<String>,
        calls: AtomicUsize,
        hints: Mutex<Vec<&'static str>>,
    }

    impl MockGateway {
        fn new(responses: Vec<&str>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().map(|r| Ok(r.to_string())).collect()),
                fallback: None,
                calls: AtomicUsize::new(0),
                hints: Mutex::new(Vec::new()),
            }
        }

        fn always(response: &str) -> Self {
            Self {
                fallback: Some(response.to_string()),
                ..Self::new(vec![])
            }
        }

        fn failing(error: GatewayError) -> Self {
            let gateway = Self::new(vec![]);
            gateway.responses.lock().unwrap().push_back(Err(error));
            gateway
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            _messages: &[tooloop_domain::Message],
            hint: StructuralHint<'_>,
        ) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.hints.lock().unwrap().push(match hint {
                StructuralHint::JsonSchema { .. } => "json_schema",
                StructuralHint::JsonObject => "json_object",
                StructuralHint::None => "none",
            });
            let next = self.responses.lock().unwrap().pop_front();
            match (next, &self.fallback) {
                (Some(response), _) => response,
                (None, Some(fallback)) => Ok(fallback.clone()),
                (None, None) => Err(GatewayError::Other("No more responses".to_string())),
            }
        }
    }

    struct MockToolExecutor {
        definitions: Vec<ToolDefinition>,
        results: Mutex<VecDeque<Result<Value, ToolError>>>,
        invocations: Mutex<Vec<StructuredCall>>,
        withdrawn: Vec<String>,
    }

    impl MockToolExecutor {
        fn new(results: Vec<Result<Value, ToolError>>) -> Self {
            Self {
                definitions: vec![
                    ToolDefinition::new("send_message", "Send a message to the user")
                        .with_parameter(ToolParameter::new("message", "text", true)),
                    ToolDefinition::new("exec_shell_cmd", "Run a shell command")
                        .with_parameter(ToolParameter::new("cmd", "command", true)),
                ],
                results: Mutex::new(VecDeque::from(results)),
                invocations: Mutex::new(Vec::new()),
                withdrawn: Vec::new(),
            }
        }

        /// Still advertised in `definitions()`, but no longer executable
        fn withdraw(mut self, name: &str) -> Self {
            self.withdrawn.push(name.to_string());
            self
        }

        fn with_definition(mut self, definition: ToolDefinition) -> Self {
            self.definitions.push(definition);
            self
        }

        fn invocations(&self) -> usize {
            self.invocations.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ToolExecutorPort for MockToolExecutor {
        fn definitions(&self) -> Vec<&ToolDefinition> {
            self.definitions.iter().collect()
        }

        fn has_tool(&self, name: &str) -> bool {
            !self.withdrawn.iter().any(|w| w == name) && self.get_tool(name).is_some()
        }

        async fn execute(&self, call: &StructuredCall, ctx: &mut ToolContext) -> ToolOutcome {
            self.invocations.lock().unwrap().push(call.clone());
            ctx.set_working_dir("/after-tool");
            match self.results.lock().unwrap().pop_front() {
                Some(Ok(value)) => ToolOutcome::success(&call.call_tool, value),
                Some(Err(error)) => ToolOutcome::failure(&call.call_tool, &error),
                None => ToolOutcome::success(&call.call_tool, json!("ok")),
            }
        }
    }

    struct MockSchema;

    impl ToolSchemaPort for MockSchema {
        fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
            json!({
                "name": tool.name,
                "description": tool.description,
                "parameters": self.parameters_schema(tool),
            })
        }

        fn parameters_schema(&self, tool: &ToolDefinition) -> Value {
            let properties: serde_json::Map<String, Value> = tool
                .parameters
                .iter()
                .map(|p| (p.name.clone(), json!({"type": p.param_type.json_type()})))
                .collect();
            let required: Vec<&str> = tool
                .parameters
                .iter()
                .filter(|p| p.required)
                .map(|p| p.name.as_str())
                .collect();
            json!({"type": "object", "properties": properties, "required": required})
        }
    }

    // ==================== Helpers ====================

    fn params() -> ExecutionParams {
        ExecutionParams::default().with_thoughts_required(false)
    }

    fn session(
        gateway: Arc<MockGateway>,
        tools: Arc<MockToolExecutor>,
        params: ExecutionParams,
    ) -> AgentSession {
        AgentSession::new(
            gateway,
            tools,
            &MockSchema,
            &AgentPreset::default(),
            params,
            ToolContext::new("/start"),
        )
        .unwrap()
    }

    const SEND_HELLO: &str =
        r#"{"call_tool": "send_message", "arguments": {"message": "hello"}}"#;
    const RUN_LS: &str = r#"{"thoughts": "look around", "call_tool": "exec_shell_cmd", "arguments": {"cmd": "ls"}}"#;

    // ==================== Tests ====================

    #[test]
    fn test_history_bootstrap() {
        let session = session(
            Arc::new(MockGateway::new(vec![])),
            Arc::new(MockToolExecutor::new(vec![])),
            params(),
        );
        let messages = session.history().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("<tool-definitions>"));
        assert!(messages[0].content.contains("exec_shell_cmd"));
        assert_eq!(messages[1].role, Role::Assistant);
        assert!(messages[1].content.contains("How can I help you today?"));
        assert_eq!(session.schema().variant_count(), 2);
        assert_eq!(session.state(), LoopState::Idle);
    }

    #[test]
    fn test_duplicate_tool_names_fail_construction() {
        let tools = MockToolExecutor::new(vec![]).with_definition(
            ToolDefinition::new("exec_shell_cmd", "a second shell"),
        );
        let result = AgentSession::new(
            Arc::new(MockGateway::new(vec![])),
            Arc::new(tools),
            &MockSchema,
            &AgentPreset::default(),
            params(),
            ToolContext::new("/"),
        );
        assert!(matches!(
            result,
            Err(RunAgentError::Registry(RegistryError::DuplicateTool(name))) if name == "exec_shell_cmd"
        ));
    }

    #[tokio::test]
    async fn test_immediate_send_message_is_delivered() {
        let gateway = Arc::new(MockGateway::new(vec![SEND_HELLO]));
        let tools = Arc::new(MockToolExecutor::new(vec![]));
        let mut session = session(gateway.clone(), tools.clone(), params());

        let outcome = session.handle_query("hi", &NoAgentProgress).await.unwrap();

        assert_eq!(outcome.delivered_message(), Some("hello"));
        assert_eq!(gateway.calls(), 1);
        assert_eq!(tools.invocations(), 0);

        let messages = session.history().messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].content, "hi");
        assert_eq!(messages[3].role, Role::Assistant);
        assert!(messages[3].content.contains("\"call_tool\":\"send_message\""));
        assert_eq!(session.state(), LoopState::Idle);
    }

    #[tokio::test]
    async fn test_garbage_backend_exhausts_retry_budget() {
        let gateway = Arc::new(MockGateway::always("I refuse to speak JSON"));
        let tools = Arc::new(MockToolExecutor::new(vec![]));
        let mut session = session(gateway.clone(), tools, params().with_max_retries(3));
        let before = session.history().len();

        let err = session.handle_query("hi", &NoAgentProgress).await.unwrap_err();

        assert!(matches!(err, RunAgentError::FormatFailure { attempts: 3 }));
        assert_eq!(gateway.calls(), 3);
        // Only the user query was appended; failed attempts leave no trace
        assert_eq!(session.history().len(), before + 1);
    }

    #[tokio::test]
    async fn test_dispatch_appends_envelope_and_continues() {
        let gateway = Arc::new(MockGateway::new(vec![RUN_LS, SEND_HELLO]));
        let tools = Arc::new(MockToolExecutor::new(vec![Ok(json!("ls returned 0\nfile.txt"))]));
        let mut session = session(gateway.clone(), tools.clone(), params());

        let outcome = session.handle_query("what is here?", &NoAgentProgress).await.unwrap();

        assert_eq!(outcome.delivered_message(), Some("hello"));
        assert_eq!(gateway.calls(), 2);
        assert_eq!(tools.invocations(), 1);
        assert_eq!(session.context().working_dir(), std::path::Path::new("/after-tool"));

        let messages = session.history().messages();
        let envelope = &messages[4];
        assert_eq!(envelope.role, Role::User);
        assert_eq!(
            envelope.content,
            "<system invisible-to-user=\"true\">\n<tool-output>\nls returned 0\nfile.txt\n</tool-output>\n</system>"
        );
    }

    #[tokio::test]
    async fn test_tool_error_becomes_error_envelope() {
        let gateway = Arc::new(MockGateway::new(vec![RUN_LS, SEND_HELLO]));
        let tools = Arc::new(MockToolExecutor::new(vec![Err(ToolError::execution_failed(
            "ls returned 2",
        ))]));
        let mut session = session(gateway, tools, params());

        let outcome = session.handle_query("list", &NoAgentProgress).await.unwrap();

        assert!(matches!(outcome, TurnOutcome::Delivered { .. }));
        let envelope = &session.history().messages()[4].content;
        assert!(envelope.contains("<tool-output error=\"true\">"));
        assert!(envelope.contains("[EXECUTION_FAILED] ls returned 2"));
    }

    #[tokio::test]
    async fn test_tool_output_is_redacted_before_history() {
        let gateway = Arc::new(MockGateway::new(vec![RUN_LS, SEND_HELLO]));
        let tools = Arc::new(MockToolExecutor::new(vec![Ok(json!(
            "visible<%%!!>operator only</%%!!> tail"
        ))]));
        let mut session = session(gateway, tools, params());

        session.handle_query("go", &NoAgentProgress).await.unwrap();

        let envelope = &session.history().messages()[4].content;
        assert!(envelope.contains("visible tail"));
        assert!(!envelope.contains("operator only"));
    }

    #[tokio::test]
    async fn test_malformed_redaction_markup_propagates() {
        let gateway = Arc::new(MockGateway::new(vec![RUN_LS]));
        let tools = Arc::new(MockToolExecutor::new(vec![Ok(json!("oops <%%!!> unterminated"))]));
        let mut session = session(gateway, tools, params());

        let err = session.handle_query("go", &NoAgentProgress).await.unwrap_err();
        assert!(matches!(
            err,
            RunAgentError::Redaction(RedactionError::MalformedMarkup { .. })
        ));
    }

    #[tokio::test]
    async fn test_dispatch_bound_yields_truncated() {
        let gateway = Arc::new(MockGateway::always(RUN_LS));
        let tools = Arc::new(MockToolExecutor::new(vec![]));
        let mut session = session(gateway.clone(), tools.clone(), params().with_max_iterations(2));

        let outcome = session.handle_query("loop forever", &NoAgentProgress).await.unwrap();

        match outcome {
            TurnOutcome::Truncated { call, dispatches } => {
                assert_eq!(dispatches, 2);
                assert_eq!(call.call_tool, "exec_shell_cmd");
            }
            other => panic!("expected truncation, got {other:?}"),
        }
        assert_eq!(tools.invocations(), 2);
        assert_eq!(gateway.calls(), 3);
    }

    #[tokio::test]
    async fn test_disallowed_dispatch_stops_without_invocation() {
        let gateway = Arc::new(MockGateway::new(vec![RUN_LS]));
        let tools = Arc::new(MockToolExecutor::new(vec![]));
        let mut session = session(gateway, tools.clone(), params().with_tool_calls_allowed(false));
        let before = session.history().len();

        let outcome = session.handle_query("ls please", &NoAgentProgress).await.unwrap();

        assert!(matches!(
            outcome,
            TurnOutcome::Stopped { reason: StopReason::DispatchDisallowed, .. }
        ));
        assert_eq!(tools.invocations(), 0);
        // user query + assistant call, no tool-output message
        assert_eq!(session.history().len(), before + 2);
        assert_eq!(session.history().last().unwrap().role, Role::Assistant);
    }

    #[test]
    fn test_unregistered_tool_is_classified_as_stop() {
        let session = session(
            Arc::new(MockGateway::new(vec![])),
            Arc::new(MockToolExecutor::new(vec![])),
            params(),
        );
        assert_eq!(
            session.classify(&StructuredCall::new("format_disk")),
            CallDisposition::Stop(StopReason::UnknownTool)
        );
        assert_eq!(
            session.classify(&StructuredCall::new("send_message")),
            CallDisposition::Deliver
        );
        assert_eq!(
            session.classify(&StructuredCall::new("exec_shell_cmd")),
            CallDisposition::Dispatch
        );
    }

    #[tokio::test]
    async fn test_withdrawn_tool_stops_loop_without_tool_output() {
        let gateway = Arc::new(MockGateway::new(vec![RUN_LS]));
        let tools = Arc::new(MockToolExecutor::new(vec![]).withdraw("exec_shell_cmd"));
        let mut session = session(gateway.clone(), tools.clone(), params());
        let before = session.history().len();

        let outcome = session.handle_query("ls please", &NoAgentProgress).await.unwrap();

        match outcome {
            TurnOutcome::Stopped { reason, call } => {
                assert_eq!(reason, StopReason::UnknownTool);
                assert_eq!(call.call_tool, "exec_shell_cmd");
            }
            other => panic!("expected stop, got {other:?}"),
        }
        assert_eq!(gateway.calls(), 1);
        assert_eq!(tools.invocations(), 0);
        assert_eq!(session.history().len(), before + 2);
        assert_eq!(session.history().last().unwrap().role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_minimal_preset_accepts_calls_without_thoughts() {
        let gateway = Arc::new(MockGateway::new(vec![SEND_HELLO]));
        let tools = Arc::new(MockToolExecutor::new(vec![]));
        let mut session = AgentSession::new(
            gateway.clone(),
            tools,
            &MockSchema,
            &AgentPreset::tooluse_min(),
            ExecutionParams::default()
                .with_fc_mode(tooloop_domain::FunctionCallingMode::JsonMode),
            ToolContext::new("/start"),
        )
        .unwrap();

        let outcome = session.handle_query("hi", &NoAgentProgress).await.unwrap();

        assert_eq!(outcome.delivered_message(), Some("hello"));
        assert_eq!(gateway.calls(), 1);
        assert!(!session.params().thoughts_required);
    }

    #[tokio::test]
    async fn test_full_preset_still_requires_thoughts() {
        let gateway = Arc::new(MockGateway::always(SEND_HELLO));
        let tools = Arc::new(MockToolExecutor::new(vec![]));
        let mut session = session(
            gateway.clone(),
            tools,
            ExecutionParams::default().with_max_retries(2),
        );

        let err = session.handle_query("hi", &NoAgentProgress).await.unwrap_err();

        assert!(matches!(err, RunAgentError::FormatFailure { attempts: 2 }));
        assert!(session.params().thoughts_required);
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let gateway = Arc::new(MockGateway::failing(GatewayError::Timeout));
        let tools = Arc::new(MockToolExecutor::new(vec![]));
        let mut session = session(gateway.clone(), tools, params());

        let err = session.handle_query("hi", &NoAgentProgress).await.unwrap_err();
        assert!(matches!(err, RunAgentError::Backend(GatewayError::Timeout)));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_fc_mode_selects_hint_and_formatter_applies() {
        let gateway = Arc::new(MockGateway::new(vec![SEND_HELLO]));
        let tools = Arc::new(MockToolExecutor::new(vec![]));
        let mut session = session(
            gateway.clone(),
            tools,
            params().with_fc_mode(tooloop_domain::FunctionCallingMode::JsonMode),
        )
        .with_input_formatter(|s| format!("<user-input>{s}</user-input>"));

        session.handle_query("hey", &NoAgentProgress).await.unwrap();

        assert_eq!(*gateway.hints.lock().unwrap(), vec!["json_object"]);
        assert_eq!(session.history().messages()[2].content, "<user-input>hey</user-input>");
    }

    #[tokio::test]
    async fn test_nested_arguments_reach_executor() {
        let headers = ToolDefinition::new("raw_http_request", "HTTP").with_parameter(
            ToolParameter::new("headers", "headers", true)
                .with_type(ParamType::Object(tooloop_domain::ObjectType::new("HttpHeaders"))),
        );
        let gateway = Arc::new(MockGateway::new(vec![
            r#"{"call_tool": "raw_http_request", "arguments": {"headers": {"Accept": "*/*"}}}"#,
            SEND_HELLO,
        ]));
        let tools = Arc::new(MockToolExecutor::new(vec![]).with_definition(headers));
        let mut session = session(gateway, tools.clone(), params());

        session.handle_query("fetch", &NoAgentProgress).await.unwrap();

        let invocations = tools.invocations.lock().unwrap();
        assert_eq!(invocations[0].arguments["headers"]["Accept"], "*/*");
    }
}
