//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;
use tooloop_domain::FunctionCallingMode;

/// CLI arguments for tooloop
#[derive(Parser, Debug)]
#[command(name = "tooloop")]
#[command(author, version, about = "Structured tool-calling agent for OpenAI-compatible backends")]
#[command(long_about = r#"
tooloop runs an agent that answers by emitting one structured tool call per
turn. Tool results are fed back until the agent calls send_message.

After the optional initial query, further queries are read from stdin
(one per line). End input with Ctrl-D.

Configuration files are loaded from (in priority order):
1. TOOLOOP_* environment variables (e.g. TOOLOOP_BACKEND__MODEL)
2. --config <path>       Explicit config file
3. ./tooloop.toml        Project-level config
4. ~/.config/tooloop/config.toml   Global config

Example:
  tooloop "How much disk space is left?"
  tooloop --toolset shell --fc-mode json_mode "List the five largest files here"
  tooloop --list-tools
"#)]
pub struct Cli {
    /// Initial query (interactive input follows either way)
    pub query: Option<String>,

    /// Agent preset: tooluse, tooluse_min
    #[arg(long, value_name = "NAME")]
    pub agent: Option<String>,

    /// How output structure is requested: json_schema, json_mode, none
    #[arg(long, value_name = "MODE")]
    pub fc_mode: Option<FunctionCallingMode>,

    /// Named toolset: basic, webgpt, shell, all, default
    #[arg(long, value_name = "NAME")]
    pub toolset: Option<String>,

    /// Exclude a tool from the toolset (can be specified multiple times)
    #[arg(long, value_name = "TOOL")]
    pub exclude: Vec<String>,

    /// Print every available tool with its JSON schema and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Model name sent to the backend
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum tool dispatches per query
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Maximum backend attempts per structured call
    #[arg(long, value_name = "N")]
    pub max_retries: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
