//! Tool implementations for the agent system
//!
//! Concrete [`Tool`] adapters an agent can call, plus the registry and the
//! schema converter that expose them to the orchestration loop.
//!
//! | Tool | Module |
//! |------|--------|
//! | `append_to_text_file`, `read_from_text_file` | [`file`] |
//! | `browse_url`, `raw_http_request`, `google_search` | [`web`] |
//! | `change_directory` | [`directory`] |
//! | `exec_shell_cmd` | [`command`] |
//! | `grep` | [`search`] |
//! | `send_message` | [`message`] |

pub mod command;
pub mod directory;
pub mod file;
pub mod message;
pub mod search;
pub mod web;

mod registry;
mod schema;

pub use registry::ToolRegistry;
pub use schema::JsonSchemaToolConverter;

use std::sync::Arc;
use tooloop_domain::tool::Tool;

/// Every tool this build provides, sorted by name
pub fn default_catalog() -> Vec<Arc<dyn Tool>> {
    let client = web::http_client();

    let mut catalog: Vec<Arc<dyn Tool>> = vec![
        Arc::new(file::AppendToTextFileTool::new()),
        Arc::new(web::BrowseUrlTool::new(client.clone())),
        Arc::new(directory::ChangeDirectoryTool::new()),
        Arc::new(command::ExecShellCmdTool::new()),
        Arc::new(search::GrepTool::new()),
        Arc::new(web::RawHttpRequestTool::new(client.clone())),
        Arc::new(file::ReadFromTextFileTool::new()),
        Arc::new(message::SendMessageTool::new()),
    ];

    #[cfg(feature = "web-tools")]
    catalog.push(Arc::new(web::GoogleSearchTool::new(client)));

    catalog.sort_by(|a, b| a.name().cmp(b.name()));
    catalog
}
