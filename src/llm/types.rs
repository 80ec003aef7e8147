//! Anthropic Messages API types
//!
//! Only the subset the agent loop speaks: text, tool_use and tool_result
//! blocks, custom tool definitions, and the non-streaming response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for the Anthropic Messages API
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    /// The model to use
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Input messages
    pub messages: Vec<Message>,

    /// System prompt (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Tools available to the model (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender ("user" or "assistant")
    pub role: String,

    /// Content of the message - can be a string or array of content blocks
    pub content: MessageContent,
}

/// Message content - either a simple string or array of content blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Array of content blocks (for tool use, tool results, etc.)
    Blocks(Vec<ContentBlock>),
}

impl Message {
    /// Create a simple user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a user message with content blocks (for tool results)
    pub fn user_with_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Blocks(blocks),
        }
    }

    /// Create an assistant message with content blocks (for tool use)
    pub fn assistant_with_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: MessageContent::Blocks(blocks),
        }
    }

    /// Get content blocks if this message has blocks
    pub fn blocks(&self) -> Option<&[ContentBlock]> {
        match &self.content {
            MessageContent::Text(_) => None,
            MessageContent::Blocks(blocks) => Some(blocks),
        }
    }

    /// All text in this message, blocks joined by newlines
    pub fn text(&self) -> String {
        match &self.content {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|b| b.as_text())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

// ============================================================================
// Content Blocks
// ============================================================================

/// Content block in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Text content
    #[serde(rename = "text")]
    Text { text: String },

    /// Tool use request from the model
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },

    /// Tool result from the user
    #[serde(rename = "tool_result")]
    ToolResult {
        tool_use_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },

    /// Any block type the agent does not handle (thinking, server tools, ...)
    #[serde(other)]
    Unsupported,
}

impl ContentBlock {
    /// Create a text content block
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Create a tool use content block
    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Create a tool result content block
    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>, is_error: bool) -> Self {
        ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: Some(content.into()),
            is_error: if is_error { Some(true) } else { None },
        }
    }

    /// Get the text content if this is a text block
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Get the tool use info if this is a tool use block
    pub fn as_tool_use(&self) -> Option<(&str, &str, &Value)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id.as_str(), name.as_str(), input)),
            _ => None,
        }
    }
}

// ============================================================================
// Tool Definitions
// ============================================================================

/// Tool definition exposed to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Tool description
    pub description: String,

    /// JSON schema for the tool input
    pub input_schema: ToolInputSchema,
}

/// JSON schema for tool input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInputSchema {
    /// Type (always "object")
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Properties of the input object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,

    /// Required properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ToolInputSchema {
    /// Create a new tool input schema
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: None,
            required: None,
        }
    }

    /// Set the properties
    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Set the required fields
    pub fn with_required(mut self, required: &[&str]) -> Self {
        self.required = Some(required.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl Default for ToolInputSchema {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Response from the Anthropic Messages API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Unique message ID
    #[serde(default)]
    pub id: String,

    /// Role (always "assistant")
    #[serde(default = "default_assistant_role")]
    pub role: String,

    /// Content blocks in the response
    pub content: Vec<ContentBlock>,

    /// Model used
    #[serde(default)]
    pub model: String,

    /// Reason for stopping
    #[serde(default)]
    pub stop_reason: Option<StopReason>,

    /// Token usage
    #[serde(default)]
    pub usage: Usage,
}

fn default_assistant_role() -> String {
    "assistant".to_string()
}

impl MessageResponse {
    /// Get all text content from the response
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| block.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Check if the response contains tool use
    pub fn has_tool_use(&self) -> bool {
        self.content.iter().any(|block| matches!(block, ContentBlock::ToolUse { .. }))
    }
}

/// Reason why the model stopped generating
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Model reached a natural stopping point
    EndTurn,
    /// Max tokens reached
    MaxTokens,
    /// Stop sequence matched
    StopSequence,
    /// Model invoked tools
    ToolUse,
    /// Long-running turn was paused
    PauseTurn,
    /// Policy violation refusal
    Refusal,
}

/// Token usage information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Input tokens used
    #[serde(default)]
    pub input_tokens: u32,

    /// Output tokens generated
    #[serde(default)]
    pub output_tokens: u32,
}

/// Error response from the Anthropic API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,

    /// Error details
    pub error: ApiErrorDetails,
}

/// Details of an API error
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,

    /// Error message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tool_use_response() {
        let body = json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "model": "claude-test",
            "content": [
                {"type": "text", "text": "Let me look."},
                {"type": "tool_use", "id": "toolu_1", "name": "bash", "input": {"command": "ls"}}
            ],
            "stop_reason": "tool_use",
            "stop_sequence": null,
            "usage": {"input_tokens": 10, "output_tokens": 5}
        });

        let response: MessageResponse = serde_json::from_value(body).unwrap();
        assert!(response.has_tool_use());
        assert_eq!(response.text(), "Let me look.");
        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
        assert_eq!(
            response.content[1].as_tool_use(),
            Some(("toolu_1", "bash", &json!({"command": "ls"})))
        );
    }

    #[test]
    fn test_unknown_block_type_tolerated() {
        let body = json!({
            "content": [
                {"type": "thinking", "thinking": "hmm", "signature": "sig"},
                {"type": "text", "text": "Done"}
            ]
        });

        let response: MessageResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.content[0], ContentBlock::Unsupported);
        assert_eq!(response.text(), "Done");
        assert!(!response.has_tool_use());
    }

    #[test]
    fn test_tool_result_serialization() {
        let ok = serde_json::to_value(ContentBlock::tool_result("t1", "fine", false)).unwrap();
        assert_eq!(ok, json!({"type": "tool_result", "tool_use_id": "t1", "content": "fine"}));

        let err = serde_json::to_value(ContentBlock::tool_result("t2", "boom", true)).unwrap();
        assert_eq!(err["is_error"], json!(true));
    }

    #[test]
    fn test_message_text() {
        let msg = Message::user_with_blocks(vec![
            ContentBlock::tool_result("t1", "out", false),
            ContentBlock::text("<reminder>hi</reminder>"),
        ]);
        assert_eq!(msg.text(), "<reminder>hi</reminder>");
        assert_eq!(Message::user("plain").text(), "plain");
    }
}
