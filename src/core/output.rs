//! Progress events emitted by the agent while it runs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events streamed FROM the agent to a front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AgentEvent {
    /// Text produced by the model
    Text(String),

    /// Tool execution starting
    ToolCall {
        /// Tool use ID
        id: String,
        /// Tool name
        name: String,
        /// Tool input
        input: Value,
    },

    /// Tool execution finished
    ToolResult {
        /// Tool use ID
        id: String,
        /// Tool name
        name: String,
        /// Output text
        output: String,
        /// Whether this is an error
        is_error: bool,
    },

    /// A reminder was injected into the transcript
    Reminder(String),
}
