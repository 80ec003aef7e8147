//! Agent loop phases

use super::error::AgentError;
use crate::tools::ToolInvocation;

/// Where the agent loop currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum LoopPhase {
    /// Transcript is ready to be sent to the model
    AwaitingModel,

    /// The model asked for tools; these are waiting to be dispatched
    Dispatching(Vec<ToolInvocation>),

    /// The model delivered its final answer
    Terminated {
        /// Concatenated text of the closing response
        final_text: String,
    },

    /// The run ended without a final answer
    Failed(AgentError),
}

impl LoopPhase {
    /// Check if the loop is in a terminal phase (Terminated or Failed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopPhase::Terminated { .. } | LoopPhase::Failed(_))
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            LoopPhase::AwaitingModel => "awaiting_model",
            LoopPhase::Dispatching(_) => "dispatching",
            LoopPhase::Terminated { .. } => "terminated",
            LoopPhase::Failed(_) => "failed",
        }
    }
}
