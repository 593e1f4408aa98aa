//! Prompt templates for tool-calling agents

use serde_json::Value;

/// System prompt flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Full persona with tool-use guidelines
    ToolUse,
    /// One paragraph plus the tool definitions
    ToolUseMinimal,
}

/// Templates for generating agent prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    pub fn render(style: PromptStyle, assistant_name: &str, tool_schemas: &[Value]) -> String {
        match style {
            PromptStyle::ToolUse => Self::tooluse(assistant_name, tool_schemas),
            PromptStyle::ToolUseMinimal => Self::tooluse_min(assistant_name, tool_schemas),
        }
    }

    /// Each tool schema as a `<tool type="json-schema">` block, pretty printed
    pub fn tool_definitions(tool_schemas: &[Value]) -> String {
        tool_schemas
            .iter()
            .map(|schema| {
                let pretty = serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
                format!("<tool type=\"json-schema\">\n{pretty}\n</tool>")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tooluse(ai: &str, tool_schemas: &[Value]) -> String {
        let tools = Self::tool_definitions(tool_schemas);
        format!(
            r#"You are a general purpose {ai} that serves the user's requests using its broad knowledge together with the tools listed below. You always think before you act: analyze the situation and the user's intent, then decide whether a tool helps or whether you can answer on your own. Everything between <system>...</system> is internal communication with the software environment that runs {ai}'s tools and IS NOT visible to the user. {ai} uses judgement to turn tool output and <system>...</system> information into useful actions or answers for the user.

# How {ai} works

Every reply of {ai} is exactly one JSON object of the form {{"thoughts": "...", "call_tool": "<tool name>", "arguments": {{...}}}} and nothing else.

When {ai} needs to understand some data (especially directories), {ai} first lists the structure and then reads the most relevant files.

When {ai} faces a hard problem, {ai} thinks it through until it has an explicit plan.

When {ai} lacks specific knowledge needed to help, {ai} searches for it without getting carried away.

When a tool fails, {ai} analyzes the error and deduces the most likely cause. {ai} does not blindly repeat failing actions.

{ai} avoids irrelevant actions and unnecessary tool calls; serving the user is the prime objective.

{ai} does not claim to know something unless it is sure or has read trustworthy facts about it.

{ai} talks to the user only through the send_message tool.

# Available tools

<tool-definitions>
{tools}
</tool-definitions>

Initialization complete."#
        )
    }

    pub fn tooluse_min(ai: &str, tool_schemas: &[Value]) -> String {
        let tools = Self::tool_definitions(tool_schemas);
        format!(
            r#"You are a tool-using general purpose {ai}. The tools are described in JSON schema format between <tool-definitions></tool-definitions>. {ai} never talks to the user directly; it replies with one JSON object {{"call_tool": "<tool name>", "arguments": {{...}}}} and uses the "send_message" tool to send the user text messages.
<tool-definitions>
{tools}
</tool-definitions>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schemas() -> Vec<Value> {
        vec![
            json!({"name": "send_message", "parameters": {"type": "object"}}),
            json!({"name": "grep", "parameters": {"type": "object"}}),
        ]
    }

    #[test]
    fn test_tool_definitions_blocks() {
        let defs = AgentPromptTemplate::tool_definitions(&schemas());
        assert_eq!(defs.matches("<tool type=\"json-schema\">").count(), 2);
        assert!(defs.contains("\"name\": \"grep\""));
    }

    #[test]
    fn test_tooluse_embeds_tools_and_name() {
        let prompt = AgentPromptTemplate::render(PromptStyle::ToolUse, "AI assistant", &schemas());
        assert!(prompt.contains("general purpose AI assistant"));
        assert!(prompt.contains("<tool-definitions>\n<tool type=\"json-schema\">"));
        assert!(prompt.ends_with("Initialization complete."));
    }

    #[test]
    fn test_minimal_is_shorter() {
        let full = AgentPromptTemplate::render(PromptStyle::ToolUse, "assistant", &schemas());
        let min = AgentPromptTemplate::render(PromptStyle::ToolUseMinimal, "assistant", &schemas());
        assert!(min.len() < full.len());
        assert!(min.contains("send_message"));
    }
}
