//! Tool domain module
//!
//! Everything a tool-calling agent needs to know about tools, independent of
//! how any particular tool is implemented:
//!
//! ```text
//! ┌──────────────┐    ┌────────────────┐    ┌───────────────┐    ┌─────────────┐
//! │ToolSelection │───▶│ ToolDefinition │───▶│ StructuredCall│───▶│ ToolOutcome │
//! │ (which tools)│    │ (name, params) │    │ (model output)│    │ (result)    │
//! └──────────────┘    └────────────────┘    └───────┬───────┘    └─────────────┘
//!                                                   │ coerce
//!                                                   ▼
//!                                           ToolArguments ──▶ Tool::invoke(args, ctx)
//! ```
//!
//! The terminal tool ([`TERMINAL_TOOL`](entities::TERMINAL_TOOL)) is special:
//! a call to it ends the turn and is never executed.

pub mod arguments;
pub mod context;
pub mod entities;
pub mod selection;
pub mod traits;
pub mod value_objects;

pub use arguments::{ArgValue, StructuredArg, ToolArguments};
pub use context::ToolContext;
pub use entities::{ObjectType, ParamType, StructuredCall, TERMINAL_TOOL, ToolDefinition, ToolParameter};
pub use selection::{ResolvedSelection, TOOLSET_PRESETS, ToolSelection, WILDCARD};
pub use traits::Tool;
pub use value_objects::{ToolError, ToolOutcome};
