//! Scripted provider for tests and offline demos.
//!
//! Each call pops the next canned reply from the front of the queue and
//! records the request so tests can inspect exactly what was sent.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use serde_json::{json, Value};

use super::provider::LlmProvider;
use super::types::{Message, ToolDefinition};

/// One recorded call to the provider
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub system: Option<String>,
    pub tools: Vec<ToolDefinition>,
}

/// A canned reply: raw body, or a boundary failure message
type Reply = std::result::Result<String, String>;

/// Pre-scripted provider. Returns an error once the script runs out.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    /// Build a provider that answers with `bodies` in order
    pub fn new<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(bodies.into_iter().map(|b| Ok(b.into())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another raw response body
    pub fn push_reply(&self, body: impl Into<String>) {
        self.lock_replies().push_back(Ok(body.into()));
    }

    /// Queue a boundary failure
    pub fn push_failure(&self, message: impl Into<String>) {
        self.lock_replies().push_back(Err(message.into()));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.lock_replies().len()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Reply>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedProvider {
    async fn send_with_tools(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
        tools: Vec<ToolDefinition>,
    ) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedRequest {
                messages,
                system: system.map(str::to_string),
                tools,
            });

        match self.lock_replies().pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("Scripted provider has no replies left")),
        }
    }

    fn model(&self) -> String {
        "scripted-model".to_string()
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Response body holding only a final text answer
pub fn text_response(text: &str) -> String {
    json!({
        "id": "msg_scripted",
        "type": "message",
        "role": "assistant",
        "model": "scripted-model",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 0, "output_tokens": 0}
    })
    .to_string()
}

/// Response body requesting the given `(id, name, input)` tool calls
pub fn tool_use_response(calls: &[(&str, &str, Value)]) -> String {
    let content: Vec<Value> = calls
        .iter()
        .map(|(id, name, input)| {
            json!({"type": "tool_use", "id": id, "name": name, "input": input})
        })
        .collect();

    json!({
        "id": "msg_scripted",
        "type": "message",
        "role": "assistant",
        "model": "scripted-model",
        "content": content,
        "stop_reason": "tool_use",
        "usage": {"input_tokens": 0, "output_tokens": 0}
    })
    .to_string()
}
