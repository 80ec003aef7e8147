//! Helpers used by the agent loop
//!
//! - `TodoManager` - Owns and validates the session todo list
//! - `Debugger` - Write API calls and tool executions to trace files

pub mod debugger;
pub mod todo_manager;

pub use debugger::{Debugger, EventType};
pub use todo_manager::{TodoItem, TodoManager, TodoStatus, MAX_TODOS};
