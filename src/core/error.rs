//! Error types
//!
//! Tool-level errors (`ValidationError`, `SchemaError`, `ToolCallError`,
//! `ToolExecutionError`) are turned into error tool results and handed back
//! to the model. Only `AgentError` ends a run.

use thiserror::Error;

/// Rejected todo list update
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// More items than the list may hold
    #[error("Max {max} todos allowed, got {count}")]
    TooManyItems { count: usize, max: usize },

    /// More than one item marked in_progress
    #[error("Only one task can be in_progress at a time, got {count}")]
    MultipleInProgress { count: usize },

    /// A record that does not describe a valid todo item
    #[error("Item {index}: {detail}")]
    InvalidItem { index: usize, detail: String },
}

impl ValidationError {
    /// Machine-readable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::TooManyItems { .. } => "too_many_items",
            ValidationError::MultipleInProgress { .. } => "multiple_in_progress",
            ValidationError::InvalidItem { .. } => "invalid_item",
        }
    }

    pub(crate) fn invalid_item(index: usize, detail: impl Into<String>) -> Self {
        ValidationError::InvalidItem {
            index,
            detail: detail.into(),
        }
    }
}

/// Tool input that does not match the declared input schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Tool input must be a JSON object")]
    NotAnObject,

    #[error("Missing required parameter '{0}'")]
    MissingField(String),

    #[error("Parameter '{field}' must be of type {expected}")]
    WrongType { field: String, expected: String },

    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// A tool invocation that cannot be turned into a typed tool call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolCallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid input for {tool}: {source}")]
    Schema {
        tool: String,
        #[source]
        source: SchemaError,
    },
}

/// Failure while running a file or shell tool
#[derive(Error, Debug)]
pub enum ToolExecutionError {
    #[error("Path escapes workspace: {0}")]
    PathEscape(String),

    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Text not found in {0}")]
    TextNotFound(String),

    #[error("Dangerous command blocked: {0}")]
    Blocked(String),

    #[error("Failed to execute command: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Command timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Command failed with exit code {code}\n{output}")]
    NonZeroExit { code: i32, output: String },
}

impl ToolExecutionError {
    pub(crate) fn io(action: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        ToolExecutionError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Errors that end an agent run in the `Failed` state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The model response could not be interpreted at all
    #[error("Protocol error: {reason}")]
    Protocol { reason: String, raw: String },

    /// The model call itself failed (network, auth, non-2xx)
    #[error("Model call failed: {0}")]
    Boundary(String),

    /// The run was cancelled between rounds
    #[error("Run cancelled")]
    Cancelled,

    /// The per-run model call cap was reached
    #[error("Round limit of {0} reached")]
    RoundLimit(usize),

    /// The agent could not be assembled
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AgentError {
    /// Create a protocol error carrying the raw response for diagnostics
    pub fn protocol(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        AgentError::Protocol {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Raw model response, if this error carries one
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AgentError::Protocol { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_reasons() {
        assert_eq!(
            ValidationError::TooManyItems { count: 25, max: 20 }.reason(),
            "too_many_items"
        );
        assert_eq!(
            ValidationError::MultipleInProgress { count: 2 }.reason(),
            "multiple_in_progress"
        );
        assert_eq!(ValidationError::invalid_item(0, "x").reason(), "invalid_item");
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::MultipleInProgress { count: 2 };
        assert!(err.to_string().contains("in_progress"));

        let err = ToolCallError::Schema {
            tool: "bash".into(),
            source: SchemaError::MissingField("command".into()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid input for bash: Missing required parameter 'command'"
        );
    }

    #[test]
    fn test_protocol_error_keeps_raw() {
        let err = AgentError::protocol("not json", "<html>");
        assert_eq!(err.raw_response(), Some("<html>"));
        assert_eq!(AgentError::Cancelled.raw_response(), None);
    }
}
