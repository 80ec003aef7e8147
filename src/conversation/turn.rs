use serde::{Deserialize, Serialize};

use crate::llm::ContentBlock;
use crate::tools::ToolResult;

/// One entry in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversationTurn {
    /// Operator prompt
    User { text: String },

    /// Model-authored text and tool invocation requests
    Assistant { content: Vec<ContentBlock> },

    /// Every result of one round, in invocation order
    ToolResults { results: Vec<ToolResult> },

    /// Synthetic reminder injected by the loop
    Reminder { text: String },
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        ConversationTurn::User { text: text.into() }
    }

    pub fn reminder(text: impl Into<String>) -> Self {
        ConversationTurn::Reminder { text: text.into() }
    }

    /// Wire role of this turn
    pub fn role(&self) -> &'static str {
        match self {
            ConversationTurn::Assistant { .. } => "assistant",
            _ => "user",
        }
    }

    /// Content blocks this turn contributes to a wire message
    pub fn to_blocks(&self) -> Vec<ContentBlock> {
        match self {
            ConversationTurn::User { text } | ConversationTurn::Reminder { text } => {
                vec![ContentBlock::text(text.clone())]
            }
            ConversationTurn::Assistant { content } => content
                .iter()
                .filter(|block| !matches!(block, ContentBlock::Unsupported))
                .cloned()
                .collect(),
            ConversationTurn::ToolResults { results } => results
                .iter()
                .map(|r| ContentBlock::tool_result(&r.tool_use_id, &r.output, r.is_error))
                .collect(),
        }
    }
}
