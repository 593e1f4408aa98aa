//! Application use cases
//!
//! - [`run_agent`]: the structured tool-calling orchestration loop

pub mod run_agent;
