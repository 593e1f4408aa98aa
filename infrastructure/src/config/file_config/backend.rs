//! Backend configuration from TOML (`[backend]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [backend]
//! base_url = "http://localhost:11434/v1"   # any OpenAI-compatible server
//! model = "qwen2.5:7b"
//! api_key_env = "OPENAI_API_KEY"           # read at startup, may be unset
//! timeout_seconds = 120
//! temperature = 0.3
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Sampling temperature, server default when unset
    pub temperature: Option<f32>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: 120,
            temperature: None,
        }
    }
}
