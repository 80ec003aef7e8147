//! Append-only transcript
//!
//! Turns are only ever pushed. For the wire they are folded into
//! role-alternating messages: consecutive user-role turns (prompts,
//! reminders, tool results) share one message, in the order they were
//! appended.

use serde::Serialize;

use super::turn::ConversationTurn;
use crate::llm::{ContentBlock, Message};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Render the transcript as API messages
    pub fn to_messages(&self) -> Vec<Message> {
        let mut messages: Vec<Message> = Vec::new();
        let mut pending_role: Option<&'static str> = None;
        let mut pending: Vec<ContentBlock> = Vec::new();

        for turn in &self.turns {
            let blocks = turn.to_blocks();
            if blocks.is_empty() {
                continue;
            }

            let role = turn.role();
            if pending_role != Some(role) {
                if let Some(previous) = pending_role {
                    messages.push(Self::message(previous, std::mem::take(&mut pending)));
                }
                pending_role = Some(role);
            }
            pending.extend(blocks);
        }

        if let Some(role) = pending_role {
            messages.push(Self::message(role, pending));
        }

        messages
    }

    fn message(role: &str, blocks: Vec<ContentBlock>) -> Message {
        if role == "assistant" {
            Message::assistant_with_blocks(blocks)
        } else {
            Message::user_with_blocks(blocks)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolResult;
    use serde_json::json;

    #[test]
    fn test_reminder_and_prompt_share_first_message() {
        let mut transcript = Transcript::new();
        transcript.push(ConversationTurn::reminder("<reminder>r</reminder>"));
        transcript.push(ConversationTurn::user("do the thing"));

        let messages = transcript.to_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");

        let blocks = messages[0].blocks().unwrap();
        assert_eq!(blocks[0].as_text(), Some("<reminder>r</reminder>"));
        assert_eq!(blocks[1].as_text(), Some("do the thing"));
    }

    #[test]
    fn test_roles_alternate_with_results_before_nag() {
        let mut transcript = Transcript::new();
        transcript.push(ConversationTurn::user("go"));
        transcript.push(ConversationTurn::Assistant {
            content: vec![
                ContentBlock::text("running"),
                ContentBlock::tool_use("t1", "bash", json!({"command": "ls"})),
            ],
        });
        transcript.push(ConversationTurn::ToolResults {
            results: vec![ToolResult::success("t1", "a.txt")],
        });
        transcript.push(ConversationTurn::reminder("nag"));

        let messages = transcript.to_messages();
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant", "user"]);

        let last = messages[2].blocks().unwrap();
        assert!(matches!(&last[0], ContentBlock::ToolResult { tool_use_id, .. } if tool_use_id == "t1"));
        assert_eq!(last[1].as_text(), Some("nag"));
    }

    #[test]
    fn test_empty_assistant_turn_skipped() {
        let mut transcript = Transcript::new();
        transcript.push(ConversationTurn::user("one"));
        transcript.push(ConversationTurn::Assistant { content: vec![] });
        transcript.push(ConversationTurn::user("two"));

        let messages = transcript.to_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].blocks().unwrap().len(), 2);
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn test_error_results_flagged() {
        let mut transcript = Transcript::new();
        transcript.push(ConversationTurn::ToolResults {
            results: vec![ToolResult::error("t9", "boom")],
        });

        let value = serde_json::to_value(&transcript.to_messages()[0]).unwrap();
        assert_eq!(value["content"][0]["is_error"], json!(true));
        assert_eq!(value["content"][0]["content"], json!("boom"));
    }
}
