//! Presentation layer for tooloop
//!
//! This crate contains the CLI definition, console output formatting,
//! progress reporting, and the interactive agent REPL.

pub mod agent;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use agent::AgentRepl;
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ConsoleProgress;
