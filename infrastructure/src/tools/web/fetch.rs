//! `browse_url` and `raw_http_request` tools.
//!
//! `browse_url` goes through a reader proxy that renders pages as plain text,
//! then drops long high-entropy runs (tracking ids, base64 blobs, hashes)
//! that only waste context.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde_json::{Map, Value, json};
use std::sync::LazyLock;
use tooloop_domain::tool::{
    ObjectType, ParamType, Tool, ToolArguments, ToolContext, ToolDefinition, ToolError,
    ToolParameter,
};
use tracing::debug;

/// Tool name constants
pub const BROWSE_URL: &str = "browse_url";
pub const RAW_HTTP_REQUEST: &str = "raw_http_request";

/// Reader proxy prefix; the target URL is appended verbatim
const READER_PREFIX: &str = "https://r.jina.ai/";

const HIGH_ENTROPY_PATTERNS: &[&str] = &[
    // base64-like
    r"[a-zA-Z0-9+/]{20,}",
    // hex
    r"[0-9a-fA-F]{20,}",
    // tokens and ids
    r"[a-zA-Z0-9_-]{20,}",
    // line-number gutters ("1\n2\n3\n...")
    r"1\n(?:[2-9]\n|[1-9][0-9]\n|100\n)+",
];

static HIGH_ENTROPY_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    HIGH_ENTROPY_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

/// Remove runs of 20+ base64, hex or token characters
pub fn strip_high_entropy(text: &str) -> String {
    HIGH_ENTROPY_REGEXES
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
}

/// Get the tool definition for browse_url
pub fn browse_url_definition() -> ToolDefinition {
    ToolDefinition::new(
        BROWSE_URL,
        "Fetches a web page and returns its content as readable text.",
    )
    .with_parameter(ToolParameter::new("url", "The URL to browse", true))
}

/// Get the tool definition for raw_http_request
pub fn raw_http_request_definition() -> ToolDefinition {
    ToolDefinition::new(
        RAW_HTTP_REQUEST,
        "Sends an HTTP request with a JSON body and returns the status code, \
         response headers and body.",
    )
    .with_parameter(ToolParameter::new(
        "method",
        "HTTP method (GET, POST, PUT, PATCH, DELETE, ...)",
        true,
    ))
    .with_parameter(ToolParameter::new("url", "Request URL", true))
    .with_parameter(ToolParameter::new(
        "payload_json",
        "JSON-encoded request body (ignored for GET)",
        false,
    ))
    .with_parameter(
        ToolParameter::new("headers", "Extra request headers, name to value", false)
            .with_type(ParamType::Object(ObjectType::new("HttpHeaders"))),
    )
}

pub struct BrowseUrlTool {
    definition: ToolDefinition,
    client: reqwest::Client,
}

impl BrowseUrlTool {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            definition: browse_url_definition(),
            client,
        }
    }
}

#[async_trait]
impl Tool for BrowseUrlTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, args: ToolArguments, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let url = args.require_str("url")?;

        let response = self
            .client
            .get(format!("{}{}", READER_PREFIX, url))
            .header(USER_AGENT, ctx.user_agent())
            .send()
            .await
            .map_err(|e| ToolError::execution_failed(format!("Failed to fetch URL: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::execution_failed(format!(
                "Failed to extract content: {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ToolError::execution_failed(format!("Failed to read response: {}", e)))?;

        debug!(url, bytes = body.len(), "Fetched page");
        Ok(Value::String(strip_high_entropy(&body)))
    }
}

pub struct RawHttpRequestTool {
    definition: ToolDefinition,
    client: reqwest::Client,
}

impl RawHttpRequestTool {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            definition: raw_http_request_definition(),
            client,
        }
    }
}

/// Parse a method name, case-insensitively
pub(crate) fn parse_method(method: &str) -> Result<Method, ToolError> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| ToolError::invalid_argument(format!("Invalid HTTP method: {}", method)))
}

/// Request body for a non-GET request; an absent payload sends `{}`
pub(crate) fn parse_payload(payload_json: Option<&str>) -> Result<Value, ToolError> {
    match payload_json {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| ToolError::invalid_argument(format!("payload_json is not valid JSON: {}", e))),
        None => Ok(json!({})),
    }
}

#[async_trait]
impl Tool for RawHttpRequestTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, args: ToolArguments, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let method = parse_method(args.require_str("method")?)?;
        let url = args.require_str("url")?;

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, ctx.user_agent());

        if let Some(headers) = args.get_object("headers") {
            for (name, value) in headers.fields() {
                let value = match value.as_str() {
                    Some(s) => s.to_string(),
                    None => value.to_value().to_string(),
                };
                request = request.header(name, value);
            }
        }

        if method != Method::GET {
            request = request.json(&parse_payload(args.get_str("payload_json"))?);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ToolError::execution_failed(format!("HTTP request failed: {}", e)))?;

        let status_code = response.status().as_u16();
        let headers: Map<String, Value> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ToolError::execution_failed(format!("Failed to read response: {}", e)))?;

        debug!(%method, url, status_code, "Raw HTTP request finished");
        Ok(json!({
            "status_code": status_code,
            "headers": headers,
            "body": body,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_high_entropy() {
        let text = "Title\nsession=0123456789abcdef0123456789abcdef done\nshort words stay";
        let stripped = strip_high_entropy(text);
        assert!(!stripped.contains("0123456789abcdef"));
        assert!(stripped.contains("session= done"));
        assert!(stripped.contains("short words stay"));
    }

    #[test]
    fn test_strip_high_entropy_tokens_and_base64() {
        let stripped = strip_high_entropy("a aGVsbG8gd29ybGQgaGVsbG8gd29ybGQ= b tok_ABCDEFGHIJ-KLMNOPQRST c");
        assert_eq!(stripped, "a = b  c");
    }

    #[test]
    fn test_strip_line_number_gutter() {
        let stripped = strip_high_entropy("code\n1\n2\n3\n4\nend");
        assert_eq!(stripped, "code\nend");
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("Post").unwrap(), Method::POST);
        assert!(parse_method("BAD METHOD").is_err());
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload(None).unwrap(), json!({}));
        assert_eq!(
            parse_payload(Some(r#"{"a": [1, 2]}"#)).unwrap(),
            json!({"a": [1, 2]})
        );
        let err = parse_payload(Some("{oops")).unwrap_err();
        assert_eq!(err.code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_raw_http_request_headers_are_structured() {
        let definition = raw_http_request_definition();
        let headers = definition.parameter("headers").unwrap();
        let object = headers.param_type.as_object().unwrap();
        assert_eq!(object.type_name, "HttpHeaders");
        assert!(object.is_open());
    }
}
