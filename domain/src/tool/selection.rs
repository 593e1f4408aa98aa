//! Tool set selection
//!
//! A [`ToolSelection`] names which catalog tools an agent gets: explicit
//! names, the `*` wildcard for "everything else", and an exclusion list that
//! wins over both. Resolution keeps first-seen order and never yields a name
//! twice.

use crate::core::error::DomainError;

/// Selector matching every catalog tool
pub const WILDCARD: &str = "*";

/// Names of the built-in toolset presets
pub const TOOLSET_PRESETS: &[&str] = &["basic", "webgpt", "shell", "all", "default"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSelection {
    selectors: Vec<String>,
    exclude: Vec<String>,
}

/// Outcome of resolving a selection against a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSelection {
    /// Selected tool names in registration order
    pub names: Vec<String>,
    /// Explicitly requested names the catalog does not provide
    pub unknown: Vec<String>,
}

impl ToolSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, name: impl Into<String>) -> Self {
        self.selectors.push(name.into());
        self
    }

    pub fn include_all(self) -> Self {
        self.include(WILDCARD)
    }

    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Look up a named toolset preset
    pub fn preset(name: &str) -> Result<Self, DomainError> {
        let selection = match name {
            "basic" => Self::new().include("send_message"),
            "webgpt" => Self::new().include("send_message").include("google_search"),
            "shell" => Self::new().include("send_message").include("exec_shell_cmd"),
            "all" => Self::new()
                .include("send_message")
                .include("exec_shell_cmd")
                .include_all(),
            "default" => Self::new()
                .include("send_message")
                .include("exec_shell_cmd")
                .include_all()
                .exclude("read_from_text_file"),
            other => return Err(DomainError::UnknownToolset(other.to_string())),
        };
        Ok(selection)
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn excluded(&self) -> &[String] {
        &self.exclude
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e == name)
    }

    /// Resolve against catalog tool names (in catalog order)
    pub fn resolve<'a, I>(&self, catalog: I) -> ResolvedSelection
    where
        I: IntoIterator<Item = &'a str>,
    {
        let catalog: Vec<&str> = catalog.into_iter().collect();
        let mut resolved = ResolvedSelection::default();

        for selector in &self.selectors {
            if selector == WILDCARD {
                for name in &catalog {
                    if !self.is_excluded(name) && !resolved.names.iter().any(|n| n == name) {
                        resolved.names.push((*name).to_string());
                    }
                }
                continue;
            }

            if self.is_excluded(selector) || resolved.names.contains(selector) {
                continue;
            }
            if catalog.contains(&selector.as_str()) {
                resolved.names.push(selector.clone());
            } else if !resolved.unknown.contains(selector) {
                resolved.unknown.push(selector.clone());
            }
        }

        resolved
    }
}
