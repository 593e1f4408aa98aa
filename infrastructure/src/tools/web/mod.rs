//! **Web Tools**: `browse_url`, `raw_http_request` and `google_search`
//!
//! | Tool | Description | Key Dependency |
//! |------|-------------|----------------|
//! | `browse_url` | Fetch a page as readable text through a reader proxy | `reqwest` |
//! | `raw_http_request` | Send an arbitrary JSON HTTP request | `reqwest` |
//! | `google_search` | Search DuckDuckGo's lite HTML endpoint | `reqwest` + `scraper` |
//!
//! `google_search` parses HTML and is only compiled with the `web-tools`
//! feature:
//!
//! ```toml
//! # cli/Cargo.toml (enabled by default for end users)
//! [features]
//! default = ["web-tools"]
//! web-tools = ["tooloop-infrastructure/web-tools"]
//! ```
//!
//! All web tools share one [`reqwest::Client`] built by [`http_client`].

mod fetch;
#[cfg(feature = "web-tools")]
mod search;

use std::time::Duration;

pub use fetch::{
    BROWSE_URL, BrowseUrlTool, RAW_HTTP_REQUEST, RawHttpRequestTool, browse_url_definition,
    raw_http_request_definition, strip_high_entropy,
};
#[cfg(feature = "web-tools")]
pub use search::{
    GOOGLE_SEARCH, GoogleSearchTool, SearchResult, google_search_definition, parse_results,
};

/// Per-request timeout for web tools
const WEB_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client shared by the web tools
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(WEB_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
