//! REPL (Read-Eval-Print Loop) for interactive agent sessions
//!
//! Reads one query per line, runs it through the [`AgentSession`] and prints
//! the outcome. Backend and format failures are reported and the loop keeps
//! going; registry and redaction faults end it.

use crate::output::console::ConsoleFormatter;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tooloop_application::{
    AgentProgressNotifier, AgentSession, NoAgentProgress, RunAgentError, TurnOutcome,
};
use tracing::warn;

const PROMPT: &str = "> ";

/// Interactive agent REPL
pub struct AgentRepl {
    session: AgentSession,
    progress: Box<dyn AgentProgressNotifier>,
}

impl AgentRepl {
    pub fn new(session: AgentSession) -> Self {
        Self {
            session,
            progress: Box::new(NoAgentProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn AgentProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn session(&self) -> &AgentSession {
        &self.session
    }

    /// Run one query and print its outcome.
    ///
    /// Returns `Ok(None)` when the query failed in a way the session survives.
    pub async fn run_query(&mut self, query: &str) -> Result<Option<TurnOutcome>, RunAgentError> {
        match self.session.handle_query(query, self.progress.as_ref()).await {
            Ok(outcome) => {
                println!("{}", ConsoleFormatter::format_outcome(&outcome));
                Ok(Some(outcome))
            }
            Err(e) if e.is_recoverable() => {
                eprintln!("{}", ConsoleFormatter::format_error(&e));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Read queries from stdin until EOF
    pub async fn run(&mut self) -> Result<(), RunAgentError> {
        self.run_with_input(BufReader::new(tokio::io::stdin())).await
    }

    pub async fn run_with_input<R>(&mut self, input: R) -> Result<(), RunAgentError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        loop {
            print!("{}", PROMPT);
            let _ = std::io::stdout().flush();

            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    println!();
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read input");
                    break;
                }
            };

            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            self.run_query(query).await?;
        }

        Ok(())
    }
}
