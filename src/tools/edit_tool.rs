//! Edit tool for exact text replacement

use std::fs;

use serde::Deserialize;
use serde_json::json;

use crate::core::ToolExecutionError;
use crate::llm::{ToolDefinition, ToolInputSchema};
use super::workspace::Workspace;

/// Input for the edit tool
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditInput {
    pub path: String,
    /// Text to find; must match exactly
    pub old_text: String,
    pub new_text: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "edit_file".to_string(),
        description: "Replace the first occurrence of exact text in a file.".to_string(),
        input_schema: ToolInputSchema::new()
            .with_properties(json!({
                "path": {
                    "type": "string",
                    "description": "Relative path to the file"
                },
                "old_text": {
                    "type": "string",
                    "description": "Exact text to find (must match precisely)"
                },
                "new_text": {
                    "type": "string",
                    "description": "Replacement text"
                }
            }))
            .with_required(&["path", "old_text", "new_text"]),
    }
}

/// Edit tool for string replacement in files
#[derive(Debug, Clone)]
pub struct EditTool {
    workspace: Workspace,
}

impl EditTool {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn edit(&self, input: &EditInput) -> Result<String, ToolExecutionError> {
        let path = self.workspace.resolve(&input.path)?;
        tracing::info!("Editing file: {}", path.display());

        let content =
            fs::read_to_string(&path).map_err(|e| ToolExecutionError::io("read", &input.path, e))?;

        if !content.contains(&input.old_text) {
            return Err(ToolExecutionError::TextNotFound(input.path.clone()));
        }

        let updated = content.replacen(&input.old_text, &input.new_text, 1);
        fs::write(&path, updated).map_err(|e| ToolExecutionError::io("write", &input.path, e))?;

        Ok(format!("Edited {}", input.path))
    }
}
