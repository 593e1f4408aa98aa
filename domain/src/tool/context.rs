//! Per-agent mutable state handed to every tool invocation

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default per-command timeout for shell-like tools
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

/// Default HTTP user agent for web tools
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Working directory, safety switch and HTTP identity of one agent.
///
/// The session owns exactly one context and lends it mutably to one tool at a
/// time, so `change_directory` is visible to every later call of that session
/// and to nothing else.
#[derive(Debug, Clone)]
pub struct ToolContext {
    working_dir: PathBuf,
    safe_commands: bool,
    user_agent: String,
    command_timeout: Duration,
}

impl ToolContext {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            safe_commands: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_safe_commands(mut self, enabled: bool) -> Self {
        self.safe_commands = enabled;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn set_working_dir(&mut self, dir: impl Into<PathBuf>) {
        self.working_dir = dir.into();
    }

    /// Resolve a possibly relative path against the working directory
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    pub fn safe_commands(&self) -> bool {
        self.safe_commands
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let ctx = ToolContext::new("/srv/work");
        assert_eq!(ctx.resolve_path("notes.txt"), PathBuf::from("/srv/work/notes.txt"));
        assert_eq!(ctx.resolve_path("/etc/hosts"), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn test_defaults_and_builders() {
        let mut ctx = ToolContext::new("/a")
            .with_safe_commands(false)
            .with_command_timeout(Duration::from_secs(5));
        assert!(!ctx.safe_commands());
        assert_eq!(ctx.command_timeout(), Duration::from_secs(5));
        assert_eq!(ctx.user_agent(), DEFAULT_USER_AGENT);

        ctx.set_working_dir("/b");
        assert_eq!(ctx.working_dir(), Path::new("/b"));
    }
}
