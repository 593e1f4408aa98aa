//! Progress reporting for agent turns

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;
use tooloop_application::AgentProgressNotifier;
use tooloop_domain::{StructuredCall, ToolOutcome};

/// Longest argument preview printed on a `CALLING` line
const MAX_ARGS_DISPLAY: usize = 120;

/// Console progress: a spinner while the backend thinks, one line per tool call
pub struct ConsoleProgress {
    spinner: Mutex<Option<ProgressBar>>,
    verbose: bool,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: false,
        }
    }

    /// Also print every structured call and failed attempt
    pub fn verbose() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: true,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentProgressNotifier for ConsoleProgress {
    fn on_backend_request(&self, attempt: usize, max_attempts: usize) {
        self.clear_spinner();

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        if attempt > 1 {
            pb.set_message(format!("Thinking... (attempt {}/{})", attempt, max_attempts));
        } else {
            pb.set_message("Thinking...");
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(pb);
        }
    }

    fn on_backend_response(&self) {
        self.clear_spinner();
    }

    fn on_attempt_failed(&self, attempt: usize, max_attempts: usize, reason: &str) {
        if self.verbose {
            println!(
                "{} attempt {}/{}: {}",
                "INVALID".yellow().bold(),
                attempt,
                max_attempts,
                reason.dimmed()
            );
        }
    }

    fn on_structured_call(&self, call: &StructuredCall) {
        if self.verbose {
            println!("{}", call.to_json().dimmed());
        }
    }

    fn on_tool_call(&self, tool_name: &str, args: &str) {
        print!(
            "{} {} @ {} ... ",
            "CALLING".blue().bold(),
            tool_name.cyan(),
            truncate(args, MAX_ARGS_DISPLAY).dimmed()
        );
        let _ = std::io::stdout().flush();
    }

    fn on_tool_result(&self, _tool_name: &str, outcome: &ToolOutcome) {
        if outcome.is_success() {
            println!("{}", "SUCCESS".green().bold());
        } else {
            println!("{}", "FAILED".red().bold());
            if self.verbose {
                println!("  {}", outcome.text().red());
            }
        }
    }
}

/// Cut `s` to at most `max` characters, marking the cut
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("äöüäöü", 5), "äö...");
    }

    #[test]
    fn test_spinner_lifecycle() {
        let progress = ConsoleProgress::new();
        progress.on_backend_request(1, 5);
        assert!(progress.spinner.lock().unwrap().is_some());
        progress.on_backend_response();
        assert!(progress.spinner.lock().unwrap().is_none());
    }
}
