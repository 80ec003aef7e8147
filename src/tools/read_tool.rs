//! Read tool for reading files

use std::fs;

use serde::Deserialize;
use serde_json::json;

use super::common::truncate_output;
use crate::core::ToolExecutionError;
use crate::llm::{ToolDefinition, ToolInputSchema};
use super::workspace::Workspace;

/// Input for the read tool
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadInput {
    /// Path relative to the workspace root
    pub path: String,
    /// Maximum number of lines to return
    #[serde(default)]
    pub limit: Option<usize>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "read_file".to_string(),
        description: "Read the contents of a file in the workspace.".to_string(),
        input_schema: ToolInputSchema::new()
            .with_properties(json!({
                "path": {
                    "type": "string",
                    "description": "Relative path to the file"
                },
                "limit": {
                    "type": "integer",
                    "description": "Max lines to read (default: all)"
                }
            }))
            .with_required(&["path"]),
    }
}

/// Read tool for reading files
#[derive(Debug, Clone)]
pub struct ReadTool {
    workspace: Workspace,
}

impl ReadTool {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn read(&self, input: &ReadInput) -> Result<String, ToolExecutionError> {
        let path = self.workspace.resolve(&input.path)?;
        tracing::info!("Reading file: {}", path.display());

        let content =
            fs::read_to_string(&path).map_err(|e| ToolExecutionError::io("read", &input.path, e))?;

        let output = match input.limit {
            Some(limit) if limit > 0 => {
                let lines: Vec<&str> = content.lines().collect();
                if limit < lines.len() {
                    format!(
                        "{}\n... ({} more lines)",
                        lines[..limit].join("\n"),
                        lines.len() - limit
                    )
                } else {
                    content
                }
            }
            _ => content,
        };

        Ok(truncate_output(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(tool: &ReadTool, path: &str, limit: Option<usize>) -> Result<String, ToolExecutionError> {
        tool.read(&ReadInput {
            path: path.to_string(),
            limit,
        })
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "one\ntwo\nthree\n").unwrap();
        let tool = ReadTool::new(Workspace::new(dir.path()));

        assert_eq!(read(&tool, "notes.txt", None).unwrap(), "one\ntwo\nthree\n");
        assert_eq!(
            read(&tool, "notes.txt", Some(1)).unwrap(),
            "one\n... (2 more lines)"
        );
        assert_eq!(read(&tool, "notes.txt", Some(10)).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ReadTool::new(Workspace::new(dir.path()));

        let err = read(&tool, "missing.txt", None).unwrap_err();
        assert!(matches!(err, ToolExecutionError::Io { action: "read", .. }));
        assert!(err.to_string().contains("missing.txt"));

        assert!(matches!(
            read(&tool, "../../etc/passwd", None),
            Err(ToolExecutionError::PathEscape(_))
        ));
    }
}
