//! Application-level configuration.
//!
//! - [`ExecutionParams`]: orchestration loop control (retries, dispatch bound)
//! - [`AgentPreset`]: persona prompt and opening message

pub mod agent_preset;
pub mod execution_params;

pub use agent_preset::{AGENT_PRESETS, AgentPreset};
pub use execution_params::ExecutionParams;
