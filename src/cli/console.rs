use colored::*;
use std::io::{self, Write};

use crate::core::AgentEvent;
use crate::helpers::{TodoManager, TodoStatus};

/// Longest tool output echoed to the terminal
const MAX_DISPLAY_BYTES: usize = 500;

/// Console handles all terminal I/O with colored formatting
pub struct Console {
    user_color: Color,
    assistant_color: Color,
    tool_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            user_color: Color::Cyan,
            assistant_color: Color::Green,
            tool_color: Color::Magenta,
        }
    }

    /// Print a complete assistant message with colored formatting
    pub fn print_assistant(&self, message: &str) {
        println!(
            "{} {}",
            "Assistant:".color(self.assistant_color).bold(),
            message.color(self.assistant_color)
        );
    }

    /// Print a system message (errors, info, etc.)
    pub fn print_system(&self, message: &str) {
        println!("{} {}", "System:".yellow().bold(), message);
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Read a line of input from the user
    pub fn read_input(&self) -> io::Result<String> {
        print!("{} ", ">".color(self.user_color).bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Print a welcome banner
    pub fn print_banner(&self, model: &str) {
        println!("{}", "=".repeat(60).bright_blue());
        println!("{}", "  Todo Agent".bright_blue().bold());
        println!("{}", format!("  model: {}", model).bright_black());
        println!("{}", "=".repeat(60).bright_blue());
        println!();
        println!("Type your request and press Enter. Type 'exit', 'quit' or 'q' to end the session.");
        println!("Ctrl-C stops the current request.");
        println!();
    }

    /// Print a tool call line
    pub fn print_tool_call(&self, tool_name: &str, summary: &str) {
        println!(
            "{} {} {}",
            "Tool:".color(self.tool_color).bold(),
            format!("[{}]", tool_name).color(self.tool_color),
            summary
        );
    }

    /// Print a tool result
    pub fn print_tool_result(&self, result: &str, is_error: bool) {
        if is_error {
            println!("{} {}", "Tool Error:".red().bold(), result);
        } else {
            println!("{}", clip(result).bright_black());
        }
    }

    /// Render one progress event
    pub fn print_event(&self, event: &AgentEvent) {
        match event {
            AgentEvent::Text(text) => self.print_assistant(text),
            AgentEvent::ToolCall { name, input, .. } => {
                let summary = input
                    .get("command")
                    .or_else(|| input.get("path"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_default();
                self.print_tool_call(name, &summary);
            }
            AgentEvent::ToolResult { output, is_error, .. } => self.print_tool_result(output, *is_error),
            AgentEvent::Reminder(_) => {
                tracing::debug!("Reminder shown to model");
            }
        }
    }

    /// Print the todo list status
    pub fn print_todos(&self, todos: &TodoManager) {
        if todos.is_empty() {
            return;
        }

        let (_, _, completed) = todos.counts();
        println!();
        println!("{}", "─".repeat(60).bright_black());
        println!(
            "{} · {}",
            "Todos".bright_white().bold(),
            format!("{}/{} completed", completed, todos.len()).bright_black()
        );

        for todo in todos.items() {
            let (icon, style) = match todo.status {
                TodoStatus::Pending => ("□", Color::BrightBlack),
                TodoStatus::InProgress => ("◐", Color::Yellow),
                TodoStatus::Completed => ("✓", Color::Green),
            };

            // Show activeForm for in_progress, content otherwise
            let text = if todo.status == TodoStatus::InProgress {
                &todo.active_form
            } else {
                &todo.content
            };

            println!("  {} {}", icon.color(style), text.color(style));
        }

        println!("{}", "─".repeat(60).bright_black());
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn clip(text: &str) -> String {
    if text.len() <= MAX_DISPLAY_BYTES {
        return text.to_string();
    }
    let mut end = MAX_DISPLAY_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...\n(output truncated)", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip() {
        assert_eq!(clip("short"), "short");
        let clipped = clip(&"ü".repeat(400));
        assert!(clipped.ends_with("(output truncated)"));
    }
}
