//! `google_search` tool: web search through DuckDuckGo's lite HTML endpoint.
//!
//! The lite endpoint needs no API key and returns a plain HTML table. Each
//! result contributes one `a.result-link` (title), one `td.result-snippet`
//! (text) and one `span.link-text` (link); the three lists are zipped.
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `query` | string | Yes | The search query |

use async_trait::async_trait;
use reqwest::header::{ORIGIN, REFERER, USER_AGENT};
use scraper::{Html, Selector};
use serde::Serialize;
use serde_json::Value;
use tooloop_domain::tool::{Tool, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolParameter};
use tracing::debug;

/// Canonical tool name for the search tool.
pub const GOOGLE_SEARCH: &str = "google_search";

const DDG_LITE_URL: &str = "https://html.duckduckgo.com/lite/";
const DDG_ORIGIN: &str = "https://html.duckduckgo.com";

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub link: String,
    pub title: String,
    pub text: String,
}

/// Create the [`ToolDefinition`] for `google_search`.
pub fn google_search_definition() -> ToolDefinition {
    ToolDefinition::new(
        GOOGLE_SEARCH,
        "Searches the web and returns a list of results with link, title and snippet.",
    )
    .with_parameter(ToolParameter::new("query", "The search query", true))
}

fn select_texts(document: &Html, selector: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|el| {
            el.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Extract search results from a DuckDuckGo lite result page
pub fn parse_results(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);

    let titles = select_texts(&document, "a.result-link");
    let snippets = select_texts(&document, "td.result-snippet");
    let links = select_texts(&document, "span.link-text");

    titles
        .into_iter()
        .zip(snippets)
        .zip(links)
        .map(|((title, text), link)| SearchResult { link, title, text })
        .collect()
}

pub struct GoogleSearchTool {
    definition: ToolDefinition,
    client: reqwest::Client,
}

impl GoogleSearchTool {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            definition: google_search_definition(),
            client,
        }
    }
}

#[async_trait]
impl Tool for GoogleSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, args: ToolArguments, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let query = args.require_str("query")?;

        let response = self
            .client
            .post(DDG_LITE_URL)
            .header(ORIGIN, DDG_ORIGIN)
            .header(REFERER, format!("{}/", DDG_ORIGIN))
            .header(USER_AGENT, ctx.user_agent())
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| ToolError::execution_failed(format!("Search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::execution_failed(format!(
                "Search failed with status {}",
                status.as_u16()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ToolError::execution_failed(format!("Failed to read response: {}", e)))?;

        let results = parse_results(&html);
        debug!(query, results = results.len(), "Search finished");

        serde_json::to_value(results)
            .map_err(|e| ToolError::execution_failed(format!("Failed to encode results: {}", e)))
    }
}
