//! OpenAI-compatible chat completions gateway.
//!
//! Works with any server exposing `POST {base_url}/chat/completions`
//! (OpenAI, vLLM, llama.cpp, Ollama, LM Studio, ...). The structural hint is
//! mapped onto `response_format`:
//!
//! | Hint | `response_format` |
//! |------|-------------------|
//! | `JsonSchema` | `{"type": "json_schema", "json_schema": {"name", "schema"}}` |
//! | `JsonObject` | `{"type": "json_object"}` |
//! | `None` | omitted |

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tooloop_application::ports::llm_gateway::{GatewayError, LlmGateway, StructuralHint};
use tooloop_domain::Message;
use tracing::{debug, info};

use crate::config::FileBackendConfig;

/// Chat completions client for one model
pub struct OpenAiCompatibleGateway {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: Option<f32>,
}

impl OpenAiCompatibleGateway {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            temperature: None,
        }
    }

    /// Build from the `[backend]` section, reading the key from `api_key_env`
    pub fn from_config(config: &FileBackendConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            debug!(
                env = config.api_key_env.as_str(),
                "No API key set, sending unauthenticated requests"
            );
        }

        let gateway = Self::new(
            config.base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
        );
        Self {
            api_key,
            temperature: config.temperature,
            ..gateway
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Request body for one completion
    pub(crate) fn request_body(&self, messages: &[Message], hint: StructuralHint<'_>) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        match hint {
            StructuralHint::JsonSchema { name, schema } => {
                body["response_format"] = json!({
                    "type": "json_schema",
                    "json_schema": {"name": name, "schema": schema},
                });
            }
            StructuralHint::JsonObject => {
                body["response_format"] = json!({"type": "json_object"});
            }
            StructuralHint::None => {}
        }

        body
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Extract `choices[0].message.content` from a response body
pub(crate) fn parse_response(body: &str) -> Result<String, GatewayError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("malformed body: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(|| GatewayError::InvalidResponse("missing content".to_string()))
}

/// Map a non-success status onto a gateway error
pub(crate) fn status_error(status: StatusCode, body: &str, model: &str) -> GatewayError {
    match status {
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(format!("{}: {}", model, body)),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), body)),
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[Message],
        hint: StructuralHint<'_>,
    ) -> Result<String, GatewayError> {
        let body = self.request_body(messages, hint);

        info!(
            model = self.model.as_str(),
            messages = messages.len(),
            "Sending chat completion request"
        );

        let mut request = self.client.post(self.completions_url()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else if e.is_connect() {
                GatewayError::ConnectionError(e.to_string())
            } else {
                GatewayError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status, &text, &self.model));
        }

        let content = parse_response(&text)?;
        debug!(bytes = content.len(), "Received chat completion");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> OpenAiCompatibleGateway {
        OpenAiCompatibleGateway::new("http://localhost:8080/v1/", "test-model", Duration::from_secs(5))
    }

    #[test]
    fn test_completions_url_trims_slash() {
        assert_eq!(
            gateway().completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_json_schema() {
        let schema = json!({"title": "ai_response", "anyOf": []});
        let messages = vec![Message::system("sys"), Message::user("hi")];

        let body = gateway().with_temperature(0.5).request_body(
            &messages,
            StructuralHint::JsonSchema {
                name: "ai_response",
                schema: &schema,
            },
        );

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["messages"][0], json!({"role": "system", "content": "sys"}));
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "ai_response");
        assert_eq!(body["response_format"]["json_schema"]["schema"], schema);
    }

    #[test]
    fn test_request_body_json_object_and_none() {
        let messages = vec![Message::user("hi")];

        let body = gateway().request_body(&messages, StructuralHint::JsonObject);
        assert_eq!(body["response_format"], json!({"type": "json_object"}));
        assert!(body.get("temperature").is_none());

        let body = gateway().request_body(&messages, StructuralHint::None);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"{\"call_tool\":\"send_message\"}"}}]}"#;
        assert_eq!(parse_response(body).unwrap(), r#"{"call_tool":"send_message"}"#);
    }

    #[test]
    fn test_parse_response_missing_content() {
        assert!(matches!(
            parse_response(r#"{"choices":[]}"#),
            Err(GatewayError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(GatewayError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response("not json"),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "no such model", "m"),
            GatewayError::ModelNotAvailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::GATEWAY_TIMEOUT, "", "m"),
            GatewayError::Timeout
        ));
        match status_error(StatusCode::UNAUTHORIZED, "bad key", "m") {
            GatewayError::RequestFailed(msg) => assert_eq!(msg, "HTTP 401: bad key"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_config() {
        let config = FileBackendConfig {
            model: "local".to_string(),
            api_key_env: "TOOLOOP_TEST_UNSET_KEY_VAR".to_string(),
            temperature: Some(0.1),
            ..Default::default()
        };
        let gateway = OpenAiCompatibleGateway::from_config(&config);

        assert_eq!(gateway.name(), "local");
        assert!(gateway.api_key.is_none());
        assert_eq!(gateway.temperature, Some(0.1));
    }
}
