//! Todo List Manager
//!
//! Owns the agent's todo list. The model always sends the complete list;
//! `update` validates it as a whole and either replaces the stored list or
//! leaves it untouched.
//!
//! Usage:
//! ```ignore
//! let mut todos = TodoManager::new();
//! let snapshot = todos.update(&[json!({
//!     "content": "Run tests",
//!     "status": "in_progress",
//!     "activeForm": "Running tests"
//! })])?;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ValidationError;

/// Maximum number of items the list may hold
pub const MAX_TODOS: usize = 20;

/// Status of a todo item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoStatus::Pending => write!(f, "pending"),
            TodoStatus::InProgress => write!(f, "in_progress"),
            TodoStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A single todo item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TodoItem {
    /// The imperative form describing what needs to be done
    pub content: String,
    /// Current status of the task
    pub status: TodoStatus,
    /// The present continuous form shown during execution (e.g., "Running tests")
    #[serde(rename = "activeForm")]
    pub active_form: String,
}

impl TodoItem {
    /// Parse one raw record from the model
    fn from_record(index: usize, record: &Value) -> Result<Self, ValidationError> {
        if !record.is_object() {
            return Err(ValidationError::invalid_item(index, "expected an object"));
        }

        let item: TodoItem = serde_json::from_value(record.clone())
            .map_err(|e| ValidationError::invalid_item(index, e.to_string()))?;

        if item.content.trim().is_empty() {
            return Err(ValidationError::invalid_item(index, "content required"));
        }
        if item.active_form.trim().is_empty() {
            return Err(ValidationError::invalid_item(index, "activeForm required"));
        }

        Ok(item)
    }
}

/// Manager for the agent's todo list
#[derive(Debug, Default)]
pub struct TodoManager {
    items: Vec<TodoItem>,
}

impl TodoManager {
    /// Create a new empty todo list manager
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Validate `records` and replace the whole list with them.
    ///
    /// Returns the rendered snapshot on success. On error the current list
    /// is left exactly as it was.
    pub fn update(&mut self, records: &[Value]) -> Result<String, ValidationError> {
        if records.len() > MAX_TODOS {
            return Err(ValidationError::TooManyItems {
                count: records.len(),
                max: MAX_TODOS,
            });
        }

        let items = records
            .iter()
            .enumerate()
            .map(|(i, record)| TodoItem::from_record(i, record))
            .collect::<Result<Vec<_>, _>>()?;

        let in_progress = items
            .iter()
            .filter(|t| t.status == TodoStatus::InProgress)
            .count();
        if in_progress > 1 {
            return Err(ValidationError::MultipleInProgress { count: in_progress });
        }

        tracing::debug!("Todo list replaced with {} items", items.len());
        self.items = items;

        Ok(self.render())
    }

    /// Get the current todo list
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Check if the todo list is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of todo items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Get counts by status: (pending, in_progress, completed)
    pub fn counts(&self) -> (usize, usize, usize) {
        let count = |status| self.items.iter().filter(|t| t.status == status).count();
        (
            count(TodoStatus::Pending),
            count(TodoStatus::InProgress),
            count(TodoStatus::Completed),
        )
    }

    /// Get the currently in-progress task (if any)
    pub fn current_task(&self) -> Option<&TodoItem> {
        self.items
            .iter()
            .find(|t| t.status == TodoStatus::InProgress)
    }

    /// Render the todo list as human-readable text
    ///
    /// ```text
    /// [x] Completed task
    /// [>] In progress task <- Doing something
    /// [ ] Pending task
    ///
    /// (1/3 completed)
    /// ```
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return "No todos.".to_string();
        }

        let mut lines: Vec<String> = self
            .items
            .iter()
            .map(|item| match item.status {
                TodoStatus::Completed => format!("[x] {}", item.content),
                TodoStatus::InProgress => format!("[>] {} <- {}", item.content, item.active_form),
                TodoStatus::Pending => format!("[ ] {}", item.content),
            })
            .collect();

        let (_, _, completed) = self.counts();
        lines.push(String::new());
        lines.push(format!("({}/{} completed)", completed, self.items.len()));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(content: &str, status: &str) -> Value {
        json!({"content": content, "status": status, "activeForm": format!("Doing {}", content)})
    }

    #[test]
    fn test_new_manager() {
        let manager = TodoManager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);
        assert_eq!(manager.render(), "No todos.");
    }

    #[test]
    fn test_update_basic() {
        let mut manager = TodoManager::new();

        let snapshot = manager
            .update(&[
                json!({"content": "Task 1", "status": "pending", "activeForm": "Doing task 1"}),
                json!({"content": "Task 2", "status": "in_progress", "activeForm": "Doing task 2"}),
            ])
            .unwrap();

        assert!(snapshot.contains("Task 1"));
        assert!(snapshot.contains("Task 2"));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.items()[1].status, TodoStatus::InProgress);
    }

    #[test]
    fn test_render_format() {
        let mut manager = TodoManager::new();
        let snapshot = manager
            .update(&[
                record("Write code", "completed"),
                json!({"content": "Run tests", "status": "in_progress", "activeForm": "Running tests"}),
                record("Ship", "pending"),
            ])
            .unwrap();

        assert_eq!(
            snapshot,
            "[x] Write code\n[>] Run tests <- Running tests\n[ ] Ship\n\n(1/3 completed)"
        );
    }

    #[test]
    fn test_multiple_in_progress_rejected() {
        let mut manager = TodoManager::new();

        let err = manager
            .update(&[
                json!({"content": "Task 1", "status": "in_progress", "activeForm": "Doing 1"}),
                json!({"content": "Task 2", "status": "in_progress", "activeForm": "Doing 2"}),
            ])
            .unwrap_err();

        assert_eq!(err.reason(), "multiple_in_progress");
        assert!(err.to_string().to_lowercase().contains("in_progress"));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_too_many_items_rejected() {
        let mut manager = TodoManager::new();
        let many: Vec<Value> = (0..25)
            .map(|i| record(&format!("Task {}", i), "pending"))
            .collect();

        let err = manager.update(&many).unwrap_err();
        assert_eq!(err, ValidationError::TooManyItems { count: 25, max: 20 });
        assert!(manager.len() <= MAX_TODOS);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_twenty_items_accepted() {
        let mut manager = TodoManager::new();
        let items: Vec<Value> = (0..20)
            .map(|i| record(&format!("Task {}", i), "pending"))
            .collect();

        let snapshot = manager.update(&items).unwrap();
        assert_eq!(manager.len(), 20);
        assert!(snapshot.contains("Task 19"));
    }

    #[test]
    fn test_rejected_update_keeps_previous_list() {
        let mut manager = TodoManager::new();
        manager.update(&[record("Keep me", "pending")]).unwrap();

        let result = manager.update(&[record("A", "in_progress"), record("B", "in_progress")]);
        assert!(result.is_err());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.items()[0].content, "Keep me");
    }

    #[test]
    fn test_invalid_items() {
        let mut manager = TodoManager::new();

        let cases = vec![
            json!({"content": "X", "status": "started", "activeForm": "Doing X"}),
            json!({"content": "X", "status": "pending"}),
            json!({"content": "", "status": "pending", "activeForm": "Doing X"}),
            json!({"content": "X", "status": "pending", "activeForm": "   "}),
            json!({"content": "X", "status": "pending", "activeForm": "Doing X", "priority": "high"}),
            json!("just a string"),
        ];

        for case in cases {
            let err = manager.update(&[case.clone()]).unwrap_err();
            assert_eq!(err.reason(), "invalid_item", "case: {}", case);
        }
        assert!(manager.is_empty());
    }

    #[test]
    fn test_invalid_item_reports_index() {
        let mut manager = TodoManager::new();
        let err = manager
            .update(&[record("Fine", "pending"), json!({"content": "Bad"})])
            .unwrap_err();

        assert!(matches!(err, ValidationError::InvalidItem { index: 1, .. }));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut manager = TodoManager::new();
        let payload = vec![record("Task 1", "completed"), record("Task 2", "in_progress")];

        let first = manager.update(&payload).unwrap();
        let second = manager.update(&payload).unwrap();
        assert_eq!(first, second);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_update_replaces_whole_list() {
        let mut manager = TodoManager::new();
        manager
            .update(&[record("Old 1", "pending"), record("Old 2", "pending")])
            .unwrap();
        let snapshot = manager.update(&[record("New", "pending")]).unwrap();

        assert_eq!(manager.len(), 1);
        assert!(!snapshot.contains("Old"));
    }

    #[test]
    fn test_empty_update_clears_list() {
        let mut manager = TodoManager::new();
        manager.update(&[record("Task", "pending")]).unwrap();

        assert_eq!(manager.update(&[]).unwrap(), "No todos.");
        assert!(manager.is_empty());
    }

    #[test]
    fn test_counts_and_current_task() {
        let mut manager = TodoManager::new();
        assert!(manager.current_task().is_none());

        manager
            .update(&[
                record("Task 1", "pending"),
                record("Task 2", "in_progress"),
                record("Task 3", "completed"),
                record("Task 4", "completed"),
            ])
            .unwrap();

        assert_eq!(manager.counts(), (1, 1, 2));
        assert_eq!(manager.current_task().unwrap().content, "Task 2");
    }
}
