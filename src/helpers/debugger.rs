//! Debugger for logging API calls and tool executions
//!
//! When enabled, every request, raw response, tool call and tool result is
//! written as a numbered JSON file into `<debug_dir>/<session id>/`.
//!
//! # Example
//!
//! ```ignore
//! let debugger = Debugger::new("debug")?;
//! debugger.log_api_request(&messages, Some(system_prompt), &tools)?;
//! debugger.log_api_response(&raw_body)?;
//! debugger.log_tool_call("read_file", "toolu_1", &input)?;
//! debugger.log_tool_result("read_file", &result)?;
//! ```

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::llm::{Message, ToolDefinition};
use crate::tools::ToolResult;

/// Debugger for logging API calls and tool executions
pub struct Debugger {
    /// Directory where this session's trace files are stored
    dir: PathBuf,
    session_id: String,
    /// Sequence counter for ordering events
    sequence: AtomicU64,
    enabled: bool,
}

/// Types of debug events
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ApiRequest,
    ApiResponse,
    ToolCall,
    ToolResult,
}

impl EventType {
    fn file_stem(self) -> &'static str {
        match self {
            EventType::ApiRequest => "api_request",
            EventType::ApiResponse => "api_response",
            EventType::ToolCall => "tool_call",
            EventType::ToolResult => "tool_result",
        }
    }
}

/// Envelope written for every event
#[derive(Debug, Serialize)]
struct TraceRecord<'a, T: Serialize> {
    event_type: EventType,
    sequence: u64,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    payload: &'a T,
}

#[derive(Debug, Serialize)]
struct ApiRequestEvent<'a> {
    system_prompt: Option<&'a str>,
    messages: &'a [Message],
    tool_definitions: &'a [ToolDefinition],
}

#[derive(Debug, Serialize)]
struct ApiResponseEvent {
    /// Parsed body when it is JSON, the raw text otherwise
    response: Value,
}

#[derive(Debug, Serialize)]
struct ToolCallEvent<'a> {
    tool_name: &'a str,
    tool_id: &'a str,
    input: &'a Value,
}

#[derive(Debug, Serialize)]
struct ToolResultEvent<'a> {
    tool_name: &'a str,
    tool_id: &'a str,
    output: &'a str,
    is_error: bool,
}

impl Debugger {
    /// Create a debugger writing into a fresh session directory under `debug_dir`
    pub fn new(debug_dir: impl AsRef<Path>) -> Result<Self> {
        let session_id = Uuid::new_v4().to_string();
        let dir = debug_dir.as_ref().join(&session_id);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create debug directory: {:?}", dir))?;

        tracing::info!("[Debugger] Created debug directory: {:?}", dir);

        Ok(Self {
            dir,
            session_id,
            sequence: AtomicU64::new(0),
            enabled: true,
        })
    }

    /// Create a disabled debugger (no-op for all operations)
    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            session_id: String::new(),
            sequence: AtomicU64::new(0),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the session trace directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Log an API request (messages sent to LLM)
    pub fn log_api_request(
        &self,
        messages: &[Message],
        system_prompt: Option<&str>,
        tool_definitions: &[ToolDefinition],
    ) -> Result<()> {
        self.write(
            EventType::ApiRequest,
            None,
            &ApiRequestEvent {
                system_prompt,
                messages,
                tool_definitions,
            },
        )
    }

    /// Log a raw API response body
    pub fn log_api_response(&self, raw: &str) -> Result<()> {
        let response =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        self.write(EventType::ApiResponse, None, &ApiResponseEvent { response })
    }

    /// Log a tool call
    pub fn log_tool_call(&self, tool_name: &str, tool_id: &str, input: &Value) -> Result<()> {
        self.write(
            EventType::ToolCall,
            Some(tool_name),
            &ToolCallEvent {
                tool_name,
                tool_id,
                input,
            },
        )
    }

    /// Log a tool result
    pub fn log_tool_result(&self, tool_name: &str, result: &ToolResult) -> Result<()> {
        self.write(
            EventType::ToolResult,
            Some(tool_name),
            &ToolResultEvent {
                tool_name,
                tool_id: &result.tool_use_id,
                output: &result.output,
                is_error: result.is_error,
            },
        )
    }

    fn write<T: Serialize>(&self, event_type: EventType, suffix: Option<&str>, payload: &T) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let filename = match suffix {
            Some(suffix) => format!("{:06}_{}_{}.json", seq, event_type.file_stem(), suffix),
            None => format!("{:06}_{}.json", seq, event_type.file_stem()),
        };

        let record = TraceRecord {
            event_type,
            sequence: seq,
            timestamp: Utc::now(),
            payload,
        };

        let path = self.dir.join(&filename);
        let file = File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &record)?;

        tracing::debug!("[Debugger] Logged {} #{}", event_type.file_stem(), seq);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disabled_is_noop() {
        let debugger = Debugger::disabled();
        assert!(!debugger.is_enabled());
        debugger.log_api_response("{}").unwrap();
        debugger
            .log_tool_result("bash", &ToolResult::success("t1", "ok"))
            .unwrap();
    }

    #[test]
    fn test_writes_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        let debugger = Debugger::new(dir.path()).unwrap();
        assert!(debugger.dir().starts_with(dir.path()));
        assert!(debugger.dir().ends_with(debugger.session_id()));

        debugger
            .log_api_request(&[Message::user("hi")], Some("sys"), &[])
            .unwrap();
        debugger.log_api_response("not json").unwrap();
        debugger
            .log_tool_call("bash", "t1", &json!({"command": "ls"}))
            .unwrap();
        debugger
            .log_tool_result("bash", &ToolResult::error("t1", "boom"))
            .unwrap();

        let mut names: Vec<String> = fs::read_dir(debugger.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "000000_api_request.json",
                "000001_api_response.json",
                "000002_tool_call_bash.json",
                "000003_tool_result_bash.json",
            ]
        );

        let record: Value = serde_json::from_str(
            &fs::read_to_string(debugger.dir().join("000001_api_response.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(record["event_type"], "api_response");
        assert_eq!(record["response"], "not json");
        assert!(record["timestamp"].is_string());
    }
}
