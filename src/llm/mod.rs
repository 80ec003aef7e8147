pub mod anthropic;
pub mod config;
pub mod provider;
pub mod scripted;
pub mod types;

pub use anthropic::AnthropicProvider;
pub use config::ModelConfig;
pub use provider::LlmProvider;
pub use scripted::{text_response, tool_use_response, RecordedRequest, ScriptedProvider};
pub use types::{
    ContentBlock, Message, MessageContent, MessageRequest, MessageResponse, StopReason,
    ToolDefinition, ToolInputSchema, Usage,
};
