//! Bash tool for executing shell commands
//!
//! Commands run through `bash -c` in the workspace root with a timeout.
//! Output is stdout followed by stderr, trimmed and capped.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tokio::process::Command;
use tokio::time::timeout;

use super::truncate_output;
use crate::core::ToolExecutionError;
use crate::llm::{ToolDefinition, ToolInputSchema};

/// Default timeout (2 minutes)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Commands refused outright
const BLOCKED_PATTERN: &str = r"rm\s+-rf\s+/|\b(?:sudo|shutdown|reboot)\b|>\s*/dev/";

fn blocked(command: &str) -> bool {
    static BLOCKED: OnceLock<Regex> = OnceLock::new();
    BLOCKED
        .get_or_init(|| Regex::new(BLOCKED_PATTERN).expect("blocklist pattern is valid"))
        .is_match(command)
}

/// Input for the bash tool
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BashInput {
    /// The command to execute
    pub command: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "bash".to_string(),
        description: "Run a shell command in the workspace directory. \
            Returns combined stdout and stderr."
            .to_string(),
        input_schema: ToolInputSchema::new()
            .with_properties(json!({
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                }
            }))
            .with_required(&["command"]),
    }
}

/// Bash tool for executing shell commands
#[derive(Debug, Clone)]
pub struct BashTool {
    /// Working directory for command execution
    working_dir: PathBuf,
    timeout: Duration,
}

impl BashTool {
    pub fn new(working_dir: impl AsRef<Path>, timeout: Duration) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            timeout,
        }
    }

    pub async fn run(&self, input: &BashInput) -> Result<String, ToolExecutionError> {
        let command = input.command.as_str();

        if blocked(command) {
            tracing::warn!("Blocked bash command: {}", command);
            return Err(ToolExecutionError::Blocked(command.to_string()));
        }

        tracing::info!("Executing bash command: {}", command);
        tracing::debug!("Working directory: {}", self.working_dir.display());

        let output_future = Command::new("bash")
            .arg("-c")
            .arg(command)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match timeout(self.timeout, output_future).await {
            Ok(result) => result.map_err(ToolExecutionError::Spawn)?,
            Err(_) => {
                tracing::warn!("Command timed out after {:?}", self.timeout);
                return Err(ToolExecutionError::Timeout(self.timeout));
            }
        };

        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        let trimmed = combined.trim();
        let text = if trimmed.is_empty() {
            "(no output)".to_string()
        } else {
            truncate_output(trimmed.to_string())
        };

        let exit_code = output.status.code().unwrap_or(-1);
        tracing::debug!("Command exit code: {}", exit_code);
        tracing::debug!("Output length: {} bytes", text.len());

        if !output.status.success() {
            return Err(ToolExecutionError::NonZeroExit {
                code: exit_code,
                output: text,
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(command: &str) -> BashInput {
        BashInput {
            command: command.to_string(),
        }
    }

    #[test]
    fn test_blocklist() {
        assert!(blocked("sudo rm file"));
        assert!(blocked("rm -rf /"));
        assert!(blocked("echo x > /dev/sda"));
        assert!(blocked("shutdown -h now"));
        assert!(!blocked("cargo test"));
        assert!(!blocked("echo pseudocode"));
        assert!(!blocked("echo oops >&2"));
    }

    #[tokio::test]
    async fn test_runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let tool = BashTool::new(dir.path(), DEFAULT_TIMEOUT);

        let output = tool.run(&input("ls; echo oops >&2")).await.unwrap();
        assert!(output.contains("marker.txt"));
        assert!(output.contains("oops"));

        assert_eq!(tool.run(&input("true")).await.unwrap(), "(no output)");
    }

    #[tokio::test]
    async fn test_failures() {
        let dir = tempfile::tempdir().unwrap();
        let tool = BashTool::new(dir.path(), Duration::from_millis(200));

        match tool.run(&input("echo bad; exit 3")).await {
            Err(ToolExecutionError::NonZeroExit { code, output }) => {
                assert_eq!(code, 3);
                assert_eq!(output, "bad");
            }
            other => panic!("unexpected: {:?}", other),
        }

        assert!(matches!(
            tool.run(&input("sudo ls")).await,
            Err(ToolExecutionError::Blocked(_))
        ));
        assert!(matches!(
            tool.run(&input("sleep 5")).await,
            Err(ToolExecutionError::Timeout(d)) if d == Duration::from_millis(200)
        ));
    }
}
