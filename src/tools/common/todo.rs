//! TodoWrite tool
//!
//! The payload replaces the whole session todo list. Item-level checks are
//! done by `TodoManager`, so a bad record is reported with its index.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::ValidationError;
use crate::helpers::todo_manager::{TodoManager, MAX_TODOS};
use crate::llm::{ToolDefinition, ToolInputSchema};

/// Input for the todo tool
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TodoWriteInput {
    /// The full list of todos to set
    pub items: Vec<Value>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "TodoWrite".to_string(),
        description: "Update the task list. Use it to plan and track progress on multi-step \
            tasks. Mark exactly one task in_progress while working on it, and mark tasks \
            completed as soon as they are done."
            .to_string(),
        input_schema: ToolInputSchema::new()
            .with_properties(json!({
                "items": {
                    "type": "array",
                    "description": "Complete list of tasks (replaces existing)",
                    "maxItems": MAX_TODOS,
                    "items": {
                        "type": "object",
                        "properties": {
                            "content": {
                                "type": "string",
                                "description": "Task description"
                            },
                            "status": {
                                "type": "string",
                                "enum": ["pending", "in_progress", "completed"],
                                "description": "Task status"
                            },
                            "activeForm": {
                                "type": "string",
                                "description": "Present tense action, e.g. 'Reading files'"
                            }
                        },
                        "required": ["content", "status", "activeForm"]
                    }
                }
            }))
            .with_required(&["items"]),
    }
}

/// Apply a TodoWrite payload, returning the rendered list
pub fn apply(todos: &mut TodoManager, input: &TodoWriteInput) -> Result<String, ValidationError> {
    tracing::info!("Updating todo list with {} items", input.items.len());
    let rendered = todos.update(&input.items)?;

    let (pending, in_progress, completed) = todos.counts();
    tracing::debug!(
        "Todo list: {} pending, {} in progress, {} completed",
        pending,
        in_progress,
        completed
    );

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_updates_manager() {
        let mut todos = TodoManager::new();
        let input = TodoWriteInput {
            items: vec![json!({"content": "Write tests", "status": "in_progress", "activeForm": "Writing tests"})],
        };

        let rendered = apply(&mut todos, &input).unwrap();
        assert!(rendered.contains("[>] Write tests <- Writing tests"));
        assert_eq!(todos.len(), 1);
    }

    #[test]
    fn test_apply_rejection_keeps_list() {
        let mut todos = TodoManager::new();
        let input = TodoWriteInput {
            items: vec![json!({"content": "", "status": "pending", "activeForm": "x"})],
        };

        let err = apply(&mut todos, &input).unwrap_err();
        assert_eq!(err.reason(), "invalid_item");
        assert!(todos.is_empty());
    }
}
