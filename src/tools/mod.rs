//! Tool system for the agent
//!
//! This module provides:
//! - `ToolKind` / `ToolCall` - The closed set of tools and their typed inputs
//! - `ToolDispatcher` - Validates, executes and packages tool invocations
//! - `Workspace` - Path confinement for file tools
//! - `read_tool`, `write_tool`, `edit_tool` - File tools confined to the workspace
//! - `common` - Shell and todo tools (bash, TodoWrite)

mod dispatcher;
mod schema;
mod tool;
mod workspace;

pub mod edit_tool;
pub mod read_tool;
pub mod write_tool;

/// Common/built-in tools
pub mod common;

pub use dispatcher::{DispatchOutcome, ToolDispatcher};
pub use schema::{validate, verify_definitions};
pub use tool::{ToolCall, ToolInvocation, ToolKind, ToolResult, WorkspaceCall};
pub use workspace::Workspace;

pub use edit_tool::{EditInput, EditTool};
pub use read_tool::{ReadInput, ReadTool};
pub use write_tool::{WriteInput, WriteTool};
