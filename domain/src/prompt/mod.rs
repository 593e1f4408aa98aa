//! Prompt domain
//!
//! System prompt templates for tool-calling agents.

pub mod agent;

pub use agent::{AgentPromptTemplate, PromptStyle};
