//! Logging setup
//!
//! Logs go to a daily-rolling file so the console stays free for the
//! conversation. `RUST_LOG` overrides the default filter.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Directory for log files
pub const LOG_DIR_ENV: &str = "TODO_AGENT_LOG_DIR";
/// Set to `json` for JSON lines
pub const LOG_FORMAT_ENV: &str = "TODO_AGENT_LOG_FORMAT";

const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_FILTER: &str = "todo_agent=info";
const LOG_FILE_PREFIX: &str = "todo-agent.log";

/// Install the global subscriber
///
/// Keep the returned guard alive for the life of the process, otherwise
/// buffered lines are lost on exit.
pub fn init_logging() -> Result<WorkerGuard> {
    let log_dir = env::var(LOG_DIR_ENV).unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir))?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = env::var(LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(writer).with_ansi(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .try_init()
    }
    .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging to {}/{}", log_dir, LOG_FILE_PREFIX);
    Ok(guard)
}
