//! Write tool for creating or overwriting files

use std::fs;

use serde::Deserialize;
use serde_json::json;

use crate::core::ToolExecutionError;
use crate::llm::{ToolDefinition, ToolInputSchema};
use super::workspace::Workspace;

/// Input for the write tool
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WriteInput {
    pub path: String,
    pub content: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "write_file".to_string(),
        description: "Write content to a file in the workspace, creating parent directories \
            and replacing any existing file."
            .to_string(),
        input_schema: ToolInputSchema::new()
            .with_properties(json!({
                "path": {
                    "type": "string",
                    "description": "Relative path for the file"
                },
                "content": {
                    "type": "string",
                    "description": "Content to write"
                }
            }))
            .with_required(&["path", "content"]),
    }
}

/// Write tool for creating files
#[derive(Debug, Clone)]
pub struct WriteTool {
    workspace: Workspace,
}

impl WriteTool {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn write(&self, input: &WriteInput) -> Result<String, ToolExecutionError> {
        let path = self.workspace.resolve(&input.path)?;
        tracing::info!("Writing file: {}", path.display());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ToolExecutionError::io("create directories for", &input.path, e))?;
        }

        fs::write(&path, &input.content)
            .map_err(|e| ToolExecutionError::io("write", &input.path, e))?;

        tracing::debug!("Wrote {} bytes", input.content.len());
        Ok(format!("Wrote {} bytes to {}", input.content.len(), input.path))
    }
}
