//! Agent presets: persona prompt plus optional opening message.

use tooloop_domain::{DomainError, PromptStyle, StructuredCall, TERMINAL_TOOL};

/// Names accepted by [`AgentPreset::by_name`]
pub const AGENT_PRESETS: &[&str] = &["tooluse", "tooluse_min"];

const DEFAULT_ASSISTANT_NAME: &str = "AI assistant";
const GREETING: &str = "How can I help you today?";
const GREETING_THOUGHTS: &str = "This is the first time I see the user. I should work out what they want, greet them and show I'm ready to help.";

/// A named agent persona
#[derive(Debug, Clone, PartialEq)]
pub struct AgentPreset {
    pub name: String,
    pub assistant_name: String,
    pub style: PromptStyle,
    /// Serialized into history as the first assistant turn
    pub first_message: Option<StructuredCall>,
    /// Whether the prompt asks the model for a `thoughts` field
    pub asks_for_thoughts: bool,
}

impl AgentPreset {
    pub fn by_name(name: &str) -> Result<Self, DomainError> {
        match name {
            "tooluse" => Ok(Self::tooluse()),
            "tooluse_min" => Ok(Self::tooluse_min()),
            other => Err(DomainError::UnknownAgentPreset(other.to_string())),
        }
    }

    /// Full persona with guidelines and a greeting
    pub fn tooluse() -> Self {
        Self {
            name: "tooluse".to_string(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            style: PromptStyle::ToolUse,
            first_message: Some(
                StructuredCall::new(TERMINAL_TOOL)
                    .with_thoughts(GREETING_THOUGHTS)
                    .with_arg("message", GREETING),
            ),
            asks_for_thoughts: true,
        }
    }

    /// Short persona, no greeting
    pub fn tooluse_min() -> Self {
        Self {
            name: "tooluse_min".to_string(),
            assistant_name: "assistant".to_string(),
            style: PromptStyle::ToolUseMinimal,
            first_message: None,
            asks_for_thoughts: false,
        }
    }

    pub fn with_assistant_name(mut self, name: impl Into<String>) -> Self {
        self.assistant_name = name.into();
        self
    }
}

impl Default for AgentPreset {
    fn default() -> Self {
        Self::tooluse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tooluse_with_greeting() {
        let preset = AgentPreset::default();
        assert_eq!(preset.name, "tooluse");
        let greeting = preset.first_message.unwrap();
        assert!(greeting.is_terminal());
        assert_eq!(greeting.message(), Some("How can I help you today?"));
    }

    #[test]
    fn test_lookup() {
        for name in AGENT_PRESETS {
            assert_eq!(AgentPreset::by_name(name).unwrap().name, *name);
        }
        assert!(matches!(
            AgentPreset::by_name("pirate"),
            Err(DomainError::UnknownAgentPreset(_))
        ));
        assert!(AgentPreset::tooluse_min().first_message.is_none());
        assert!(AgentPreset::tooluse().asks_for_thoughts);
        assert!(!AgentPreset::tooluse_min().asks_for_thoughts);
    }
}
