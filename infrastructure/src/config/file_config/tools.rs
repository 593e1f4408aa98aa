//! Tools configuration from TOML (`[tools]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [tools]
//! working_dir = "~/scratch"     # default: the process working directory
//! disable_safe_cmd = false      # allow commands on the destructive deny-list
//! command_timeout_secs = 120
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tooloop_domain::tool::ToolContext;
use tooloop_domain::tool::context::{DEFAULT_COMMAND_TIMEOUT, DEFAULT_USER_AGENT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Initial working directory for file and shell tools
    pub working_dir: Option<String>,
    /// Skip the destructive-command check of `exec_shell_cmd`
    pub disable_safe_cmd: bool,
    /// User agent sent by web tools
    pub user_agent: String,
    /// Per-command timeout of shell-like tools
    pub command_timeout_secs: u64,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            working_dir: None,
            disable_safe_cmd: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT.as_secs(),
        }
    }
}

impl FileToolsConfig {
    /// Working directory with a leading `~` expanded; `None` when unset
    pub fn resolved_working_dir(&self) -> Option<PathBuf> {
        let dir = self.working_dir.as_deref()?;
        match dir.strip_prefix("~") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest.trim_start_matches('/'))),
            None => Some(PathBuf::from(dir)),
        }
    }

    /// Build a tool context rooted at `fallback_dir` unless a working dir is configured
    pub fn to_tool_context(&self, fallback_dir: PathBuf) -> ToolContext {
        ToolContext::new(self.resolved_working_dir().unwrap_or(fallback_dir))
            .with_safe_commands(!self.disable_safe_cmd)
            .with_user_agent(self.user_agent.clone())
            .with_command_timeout(Duration::from_secs(self.command_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_tool_context() {
        let config = FileToolsConfig {
            working_dir: Some("/srv/work".to_string()),
            disable_safe_cmd: true,
            command_timeout_secs: 5,
            ..Default::default()
        };
        let ctx = config.to_tool_context(PathBuf::from("/ignored"));

        assert_eq!(ctx.working_dir(), std::path::Path::new("/srv/work"));
        assert!(!ctx.safe_commands());
        assert_eq!(ctx.command_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_fallback_working_dir() {
        let ctx = FileToolsConfig::default().to_tool_context(PathBuf::from("/fallback"));
        assert_eq!(ctx.working_dir(), std::path::Path::new("/fallback"));
        assert!(ctx.safe_commands());
        assert_eq!(ctx.user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_tilde_expansion() {
        let config = FileToolsConfig {
            working_dir: Some("~/scratch".to_string()),
            ..Default::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.resolved_working_dir(), Some(home.join("scratch")));
        }
    }
}
