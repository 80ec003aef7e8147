//! LLM Provider trait
//!
//! The model boundary as the agent loop sees it: a transcript and tool
//! declarations go in, a raw response body comes out. Parsing that body is
//! the loop's job, so a malformed response can be reported with the exact
//! bytes the model sent.

use anyhow::Result;

use super::types::{Message, ToolDefinition};

/// Trait for LLM providers that can drive the agent loop.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the conversation with tools and a system prompt.
    ///
    /// Returns the raw response body. Any `Err` is a boundary failure
    /// (network, authentication, non-success status) and is not retried.
    async fn send_with_tools(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
        tools: Vec<ToolDefinition>,
    ) -> Result<String>;

    /// Get the current model name.
    fn model(&self) -> String;

    /// Get the provider name (e.g., "anthropic", "scripted").
    fn provider_name(&self) -> &str;
}
