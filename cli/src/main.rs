//! CLI entrypoint for tooloop
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::sync::Arc;
use tooloop_application::{
    AgentPreset, AgentProgressNotifier, AgentSession, NoAgentProgress, ToolSchemaPort,
};
use tooloop_domain::{Tool, ToolSelection};
use tooloop_infrastructure::{
    ConfigLoader, FileConfig, JsonSchemaToolConverter, JsonlConversationLogger,
    OpenAiCompatibleGateway, ToolRegistry, default_catalog,
};
use tooloop_presentation::{AgentRepl, Cli, ConsoleFormatter, ConsoleProgress};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    if cli.list_tools {
        list_tools();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&cli, &mut config);
    config.validate()?;

    info!(
        model = %config.backend.model,
        base_url = %config.backend.base_url,
        "Starting tooloop"
    );

    // === Dependency Injection ===
    let selection = ToolSelection::preset(&config.agent.toolset)?
        .excluding(config.agent.exclude.iter().cloned());
    let registry = Arc::new(ToolRegistry::from_selection(default_catalog(), &selection)?);
    let gateway = Arc::new(OpenAiCompatibleGateway::from_config(&config.backend));
    let preset = AgentPreset::by_name(&config.agent.name)?;
    let context = config.tools.to_tool_context(std::env::current_dir()?);

    let mut session = AgentSession::new(
        gateway,
        registry,
        &JsonSchemaToolConverter,
        &preset,
        config.agent.to_execution_params(),
        context,
    )?;

    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!(
                    path = %logger.path().display(),
                    session = logger.session(),
                    "Writing conversation transcript"
                );
                session = session.with_conversation_logger(Arc::new(logger));
            }
            None => warn!(path = %path, "Conversation transcript disabled"),
        }
    }

    let progress: Box<dyn AgentProgressNotifier> = if cli.quiet {
        Box::new(NoAgentProgress)
    } else if cli.verbose > 0 {
        Box::new(ConsoleProgress::verbose())
    } else {
        Box::new(ConsoleProgress::new())
    };

    let mut repl = AgentRepl::new(session).with_progress(progress);

    if let Some(query) = &cli.query {
        repl.run_query(query).await?;
    }
    repl.run().await?;

    Ok(())
}

/// CLI flags win over every configuration source
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(agent) = &cli.agent {
        config.agent.name = agent.clone();
    }
    if let Some(mode) = cli.fc_mode {
        config.agent.fc_mode = mode;
    }
    if let Some(toolset) = &cli.toolset {
        config.agent.toolset = toolset.clone();
    }
    config.agent.exclude.extend(cli.exclude.iter().cloned());
    if let Some(model) = &cli.model {
        config.backend.model = model.clone();
    }
    if let Some(max) = cli.max_iterations {
        config.agent.max_iterations = max;
    }
    if let Some(max) = cli.max_retries {
        config.agent.max_retries = max;
    }
}

fn list_tools() {
    let converter = JsonSchemaToolConverter;
    for tool in default_catalog() {
        let schema = converter.tool_to_schema(tool.definition());
        println!("{}", ConsoleFormatter::format_tool_listing(tool.name(), &schema));
    }
}
