//! Interactive agent front end

pub mod repl;

pub use repl::AgentRepl;
