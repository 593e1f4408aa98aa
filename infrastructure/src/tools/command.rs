//! Command execution tool: exec_shell_cmd

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::process::{Output, Stdio};
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command;
use tooloop_domain::structured::hidden;
use tooloop_domain::tool::{Tool, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolParameter};
use tooloop_domain::util::clip_output;
use tracing::{debug, warn};

/// Tool name constant
pub const EXEC_SHELL_CMD: &str = "exec_shell_cmd";

/// Maximum output size (1 MB)
pub(crate) const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

/// Commands that may modify the system, install software or move data around.
const UNSAFE_PATTERNS: &[&str] = &[
    r"\b(rm|delete|del|erase|unlink|rmdir|mv\s+/(bin|sbin|usr|lib|etc))\b",
    r"\b(chmod|chown)\s+[0-7]{3,4}\b",
    r"\b(mkdir|mkfifo|mknode|mksock)\s+",
    r"\b(mv|ln|symlink)\s+",
    r"\b(sed|awk)\s+.*\s*(>|>>|\|)\s+",
    r"\b(perl|python|ruby|php|bash|sh|zsh|ksh)\s+.*\s*(>|>>|\|)\s+",
    r"\b(dd|tar|zip|gzip|bzip2|xz)\s+",
    r"\b(chsh|chfn|usermod|groupmod)\s+",
    r"\b(apt-get|apt|yum|dnf|pip|gem|npm)\s+",
];

static UNSAFE_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    UNSAFE_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

/// Whether a command matches the destructive-command deny-list
pub fn is_potentially_destructive(cmd: &str) -> bool {
    UNSAFE_REGEXES.iter().any(|re| re.is_match(cmd))
}

/// Get the tool definition for exec_shell_cmd
pub fn exec_shell_cmd_definition() -> ToolDefinition {
    ToolDefinition::new(
        EXEC_SHELL_CMD,
        "Executes a shell command in the current working directory and returns its output. \
         Potentially destructive commands are refused.",
    )
    .with_parameter(ToolParameter::new("cmd", "The shell command to execute", true))
}

/// Runs `sh -c <cmd>` in the agent's working directory
pub struct ExecShellCmdTool {
    definition: ToolDefinition,
}

impl ExecShellCmdTool {
    pub fn new() -> Self {
        Self {
            definition: exec_shell_cmd_definition(),
        }
    }
}

impl Default for ExecShellCmdTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ExecShellCmdTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, args: ToolArguments, ctx: &mut ToolContext) -> Result<Value, ToolError> {
        let cmd = args.require_str("cmd")?;

        if ctx.safe_commands() && is_potentially_destructive(cmd) {
            warn!(cmd, "Refusing potentially destructive command");
            return Err(ToolError::permission_denied(format!(
                "Command '{}' is potentially destructive and forbidden for safety reasons.{}",
                cmd,
                hidden(
                    " Operator: set tools.disable_safe_cmd = true \
                     (or TOOLOOP_TOOLS__DISABLE_SAFE_CMD=true) to allow it."
                )
            )));
        }

        let mut command = Command::new("sh");
        command.args(["-c", cmd]);
        let output = run_with_timeout(command, ctx.working_dir(), ctx.command_timeout(), cmd).await?;

        let code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(cmd, code, stdout_bytes = stdout.len(), "Shell command finished");

        if !output.status.success() {
            return Err(ToolError::execution_failed(format!(
                "Command '{}' failed with return code {}: {}",
                cmd,
                code,
                truncate_output(&stderr)
            )));
        }

        Ok(Value::String(format!("{} returned {}\n{}", cmd, code, truncate_output(&stdout))))
    }
}

/// Spawn `command` in `working_dir`, killing it if it outlives `timeout`
pub(crate) async fn run_with_timeout(
    mut command: Command,
    working_dir: &Path,
    timeout: Duration,
    label: &str,
) -> Result<Output, ToolError> {
    if !working_dir.is_dir() {
        return Err(ToolError::not_found(format!(
            "Working directory does not exist: {}",
            working_dir.display()
        )));
    }

    command
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(ToolError::execution_failed(format!(
            "Failed to spawn command: {}",
            e
        ))),
        Err(_) => Err(ToolError::timeout(format!(
            "'{}' did not finish within {} seconds",
            label,
            timeout.as_secs()
        ))),
    }
}

pub(crate) fn truncate_output(output: &str) -> String {
    clip_output(output, MAX_OUTPUT_SIZE).into_owned()
}
