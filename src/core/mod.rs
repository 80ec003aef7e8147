//! Core types for the agent
//!
//! - `LoopPhase` - Where the agent loop stands
//! - `AgentEvent` - Progress events for front-ends
//! - Error types for todo validation, tool calls and the loop itself

pub mod error;
pub mod output;
pub mod state;

pub use error::{AgentError, SchemaError, ToolCallError, ToolExecutionError, ValidationError};
pub use output::AgentEvent;
pub use state::LoopPhase;
