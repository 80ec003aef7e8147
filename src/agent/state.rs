//! Loop state and its transitions
//!
//! Every transition takes the state by value and returns the next one. None
//! of them perform I/O: the driver makes the model call or runs the tools
//! and feeds the outcome in.

use crate::agent::reminder::{ReminderPolicy, INITIAL_REMINDER};
use crate::conversation::{ConversationTurn, Transcript};
use crate::core::{AgentError, LoopPhase};
use crate::llm::{ContentBlock, MessageResponse};
use crate::tools::{DispatchOutcome, ToolInvocation};

/// Conversation plus the counters the loop needs between rounds
#[derive(Debug, Clone, PartialEq)]
pub struct LoopState {
    transcript: Transcript,
    rounds_without_todo_update: usize,
    rounds: usize,
    phase: LoopPhase,
}

impl LoopState {
    /// Open a session: initial reminder, then the operator prompt
    pub fn start(prompt: impl Into<String>) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(ConversationTurn::reminder(INITIAL_REMINDER));
        transcript.push(ConversationTurn::user(prompt));

        Self {
            transcript,
            rounds_without_todo_update: 0,
            rounds: 0,
            phase: LoopPhase::AwaitingModel,
        }
    }

    /// Continue a finished session with another prompt
    ///
    /// History and counters carry over; the initial reminder is not repeated.
    pub fn resume(mut self, prompt: impl Into<String>) -> Self {
        if !self.phase.is_terminal() {
            tracing::warn!("Resuming an interrupted session (phase {})", self.phase.name());
        }
        self.transcript.push(ConversationTurn::user(prompt));
        self.phase = LoopPhase::AwaitingModel;
        self
    }

    /// Interpret a raw model response body
    pub fn apply_response(mut self, raw: &str) -> Self {
        let response: MessageResponse = match serde_json::from_str(raw) {
            Ok(response) => response,
            Err(e) => return self.fail(AgentError::protocol(format!("unparsable response: {}", e), raw)),
        };

        let mut invocations = Vec::new();
        for block in &response.content {
            if let ContentBlock::ToolUse { id, name, input } = block {
                if id.is_empty() || name.is_empty() {
                    return self.fail(AgentError::protocol("tool_use block without id or name", raw));
                }
                invocations.push(ToolInvocation::new(id, name, input.clone()));
            }
        }

        let final_text = response.text();
        self.transcript.push(ConversationTurn::Assistant {
            content: response.content,
        });

        self.phase = if invocations.is_empty() {
            LoopPhase::Terminated { final_text }
        } else {
            LoopPhase::Dispatching(invocations)
        };
        self
    }

    /// Record one round of tool outcomes and decide on a nag
    pub fn apply_results(mut self, outcomes: &[DispatchOutcome], policy: &ReminderPolicy) -> Self {
        self.transcript.push(ConversationTurn::ToolResults {
            results: outcomes.iter().map(|o| o.result.clone()).collect(),
        });

        if outcomes.iter().any(|o| o.todo_updated) {
            self.rounds_without_todo_update = 0;
        } else {
            self.rounds_without_todo_update += 1;
        }
        self.rounds += 1;

        if let Some(nag) = policy.check(self.rounds_without_todo_update) {
            self.transcript.push(ConversationTurn::reminder(nag));
            self.rounds_without_todo_update = 0;
        }

        self.phase = LoopPhase::AwaitingModel;
        self
    }

    /// Stop the run with `error`
    pub fn fail(mut self, error: AgentError) -> Self {
        self.phase = LoopPhase::Failed(error);
        self
    }

    /// Final answer or failure, once the phase is terminal
    pub fn outcome(&self) -> Option<Result<String, AgentError>> {
        match &self.phase {
            LoopPhase::Terminated { final_text } => Some(Ok(final_text.clone())),
            LoopPhase::Failed(error) => Some(Err(error.clone())),
            _ => None,
        }
    }

    pub fn terminated(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn phase(&self) -> &LoopPhase {
        &self.phase
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Completed tool-dispatch rounds over the whole session
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn rounds_without_todo_update(&self) -> usize {
        self.rounds_without_todo_update
    }
}
