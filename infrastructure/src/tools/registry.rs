//! Tool Registry
//!
//! The [`ToolRegistry`] holds the tools one agent may call and implements
//! [`ToolExecutorPort`]. It is built once from a catalog and a
//! [`ToolSelection`]:
//!
//! ```ignore
//! use tooloop_infrastructure::tools::{ToolRegistry, default_catalog};
//! use tooloop_domain::tool::ToolSelection;
//!
//! let registry = ToolRegistry::from_selection(
//!     default_catalog(),
//!     &ToolSelection::preset("default")?,
//! )?;
//!
//! assert!(registry.has_tool("exec_shell_cmd"));
//! assert!(!registry.has_tool("read_from_text_file"));
//! ```
//!
//! # Resolution
//!
//! 1. The catalog itself must not define a name twice
//! 2. Selectors are resolved in order; `*` expands to the whole catalog
//! 3. Exclusions apply after expansion, repeats are dropped
//! 4. Names the catalog lacks are skipped with a warning

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tooloop_application::ports::tool_executor::ToolExecutorPort;
use tooloop_domain::RegistryError;
use tooloop_domain::tool::{
    StructuredCall, Tool, ToolArguments, ToolContext, ToolDefinition, ToolError, ToolOutcome,
    ToolSelection,
};
use tracing::{debug, info, warn};

/// Registered tools in registration order, indexed by name
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Register tools as given; a repeated name is a construction failure
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(tools.len());
        for (position, tool) in tools.iter().enumerate() {
            if index.insert(tool.name().to_string(), position).is_some() {
                return Err(RegistryError::DuplicateTool(tool.name().to_string()));
            }
        }
        Ok(Self { tools, index })
    }

    /// Register the subset of `catalog` picked by `selection`
    pub fn from_selection(
        catalog: Vec<Arc<dyn Tool>>,
        selection: &ToolSelection,
    ) -> Result<Self, RegistryError> {
        let catalog = Self::new(catalog)?;
        let resolved = selection.resolve(catalog.names());

        for name in &resolved.unknown {
            warn!(tool = %name, "Selected tool is not available, skipping");
        }

        let tools = resolved
            .names
            .iter()
            .filter_map(|name| catalog.get(name).cloned())
            .collect();
        let registry = Self::new(tools)?;

        info!(
            tools = ?registry.names().collect::<Vec<_>>(),
            "Tool registry ready"
        );
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn definitions(&self) -> Vec<&ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    async fn execute(&self, call: &StructuredCall, ctx: &mut ToolContext) -> ToolOutcome {
        let name = call.call_tool.as_str();
        let Some(tool) = self.get(name) else {
            return ToolOutcome::failure(name, &ToolError::not_found(format!("tool '{}'", name)));
        };

        let start = Instant::now();
        let result = match ToolArguments::coerce(tool.definition(), &call.arguments) {
            Ok(args) => tool.invoke(args, ctx).await,
            Err(e) => Err(e),
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(value) => {
                debug!(tool = name, duration_ms, "Tool succeeded");
                ToolOutcome::success(name, value)
            }
            Err(e) => {
                warn!(tool = name, code = %e.code, duration_ms, "Tool failed: {}", e.message);
                ToolOutcome::failure(name, &e)
            }
        };
        outcome.with_duration(duration_ms)
    }
}
