//! Tool call types
//!
//! The model names a tool and hands over untyped JSON. `ToolCall::parse`
//! turns that into one variant of a closed set of typed calls, after checking
//! the input against the tool's declared schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{bash, todo};
use super::{edit_tool, read_tool, write_tool};
use super::schema;
use crate::core::{SchemaError, ToolCallError};
use crate::llm::ToolDefinition;

/// Result of executing a tool, addressed to one tool_use block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool_use block this answers
    pub tool_use_id: String,
    /// The output of the tool
    pub output: String,
    /// Whether the tool execution resulted in an error
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(tool_use_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(tool_use_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            output: message.into(),
            is_error: true,
        }
    }
}

/// A tool invocation request as issued by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub input: Value,
}

impl ToolInvocation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

/// The fixed set of tools the agent offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Bash,
    ReadFile,
    WriteFile,
    EditFile,
    TodoWrite,
}

impl ToolKind {
    /// Every tool, in declaration order
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Bash,
        ToolKind::ReadFile,
        ToolKind::WriteFile,
        ToolKind::EditFile,
        ToolKind::TodoWrite,
    ];

    /// Name the model uses to call this tool
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Bash => "bash",
            ToolKind::ReadFile => "read_file",
            ToolKind::WriteFile => "write_file",
            ToolKind::EditFile => "edit_file",
            ToolKind::TodoWrite => "TodoWrite",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Declaration sent to the model
    pub fn definition(self) -> ToolDefinition {
        match self {
            ToolKind::Bash => bash::definition(),
            ToolKind::ReadFile => read_tool::definition(),
            ToolKind::WriteFile => write_tool::definition(),
            ToolKind::EditFile => edit_tool::definition(),
            ToolKind::TodoWrite => todo::definition(),
        }
    }
}

/// A validated, typed tool call
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// Todo list update; touches loop-owned state
    Todo(todo::TodoWriteInput),
    /// File or shell tool; touches only the workspace
    Workspace(WorkspaceCall),
}

/// Tools that act on the workspace and may run concurrently
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceCall {
    Bash(bash::BashInput),
    ReadFile(read_tool::ReadInput),
    WriteFile(write_tool::WriteInput),
    EditFile(edit_tool::EditInput),
}

impl ToolCall {
    /// Resolve `name` and check `input` against the tool's schema
    pub fn parse(name: &str, input: &Value) -> Result<Self, ToolCallError> {
        let kind =
            ToolKind::from_name(name).ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;

        let schema_error = |source: SchemaError| ToolCallError::Schema {
            tool: name.to_string(),
            source,
        };

        schema::validate(&kind.definition().input_schema, input).map_err(schema_error)?;

        let call = match kind {
            ToolKind::Bash => ToolCall::Workspace(WorkspaceCall::Bash(typed(input).map_err(schema_error)?)),
            ToolKind::ReadFile => {
                ToolCall::Workspace(WorkspaceCall::ReadFile(typed(input).map_err(schema_error)?))
            }
            ToolKind::WriteFile => {
                ToolCall::Workspace(WorkspaceCall::WriteFile(typed(input).map_err(schema_error)?))
            }
            ToolKind::EditFile => {
                ToolCall::Workspace(WorkspaceCall::EditFile(typed(input).map_err(schema_error)?))
            }
            ToolKind::TodoWrite => ToolCall::Todo(typed(input).map_err(schema_error)?),
        };

        Ok(call)
    }
}

fn typed<T: serde::de::DeserializeOwned>(input: &Value) -> Result<T, SchemaError> {
    serde_json::from_value(input.clone()).map_err(|e| SchemaError::Invalid(e.to_string()))
}
