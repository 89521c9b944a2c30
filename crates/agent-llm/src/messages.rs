//! Message types for LLM communication
//!
//! A conversation is a list of [`Message`]s. Assistant turns that call tools
//! carry [`ContentBlock::ToolUse`] blocks; the answers go back as
//! [`ContentBlock::ToolResult`] blocks in a user message.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// System message (most providers take it separately)
    System,
}

/// Content block in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text { text: String },

    /// Tool call requested by the assistant
    ToolUse {
        /// Provider-assigned call ID
        id: String,
        /// Tool name as the model wrote it
        name: String,
        /// Tool arguments. A JSON object normally, or the raw argument
        /// string when the model did not produce valid JSON.
        input: serde_json::Value,
    },

    /// Result of a tool call
    ToolResult {
        /// ID of the call this answers
        tool_use_id: String,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

/// Message content: either simple text or structured blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message from blocks
    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(blocks)),
        }
    }

    /// Create a user message carrying tool results
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Blocks(results)),
        }
    }

    /// Create a user message with one tool result
    pub fn tool_result(tool_use_id: impl Into<String>, result: impl Into<String>) -> Self {
        Self::tool_results(vec![ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: result.into(),
            is_error: None,
        }])
    }

    /// Concatenated text content, if any
    pub fn text(&self) -> Option<String> {
        match &self.content {
            Some(MessageContent::Text(s)) => Some(s.clone()),
            Some(MessageContent::Blocks(blocks)) => {
                let parts: Vec<&str> = blocks
                    .iter()
                    .filter_map(|b| match b {
                        ContentBlock::Text { text } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("\n"))
                }
            }
            None => None,
        }
    }

    /// Tool calls in this message
    pub fn tool_uses(&self) -> Vec<&ContentBlock> {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks
                .iter()
                .filter(|b| matches!(b, ContentBlock::ToolUse { .. }))
                .collect(),
            _ => vec![],
        }
    }

    pub fn has_tool_uses(&self) -> bool {
        !self.tool_uses().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_messages() {
        let msg = Message::user("Bitcoin");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text().as_deref(), Some("Bitcoin"));

        let msg = Message::assistant("Resumo");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.text().as_deref(), Some("Resumo"));
    }

    #[test]
    fn test_blocks_text_and_tool_uses() {
        let msg = Message::assistant_blocks(vec![
            ContentBlock::Text {
                text: "Searching".to_string(),
            },
            ContentBlock::ToolUse {
                id: "call_0".to_string(),
                name: "search_news".to_string(),
                input: json!({ "input": "Bitcoin" }),
            },
        ]);

        assert_eq!(msg.text().as_deref(), Some("Searching"));
        assert!(msg.has_tool_uses());
        assert_eq!(msg.tool_uses().len(), 1);
    }

    #[test]
    fn test_tool_result_has_no_text() {
        let msg = Message::tool_result("call_0", "- [2024] t (s): b\n");
        assert_eq!(msg.role, Role::User);
        assert!(msg.text().is_none());
        assert!(!msg.has_tool_uses());
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::tool_result("call_0", "ok");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
