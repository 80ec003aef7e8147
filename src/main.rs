use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use todo_agent::agent::{AgentConfig, TodoAgent};
use todo_agent::cli::Console;
use todo_agent::core::AgentError;
use todo_agent::llm::{AnthropicProvider, LlmProvider, ModelConfig};
use todo_agent::logging;

/// Set to a directory to record request/response traces
const DEBUG_DIR_ENV: &str = "TODO_AGENT_DEBUG_DIR";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging system
    let _log_guard = logging::init_logging()?;

    tracing::info!("=== Todo Agent Starting ===");

    let console = Console::new();

    // Create Anthropic LLM provider from environment
    let provider = Arc::new(AnthropicProvider::new(ModelConfig::from_env())?);

    let workdir = std::env::current_dir().context("Failed to resolve current directory")?;
    let mut config = AgentConfig::for_workdir(&workdir);
    if let Ok(dir) = std::env::var(DEBUG_DIR_ENV) {
        config = config.with_debug_dir(dir);
    }

    let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut agent = TodoAgent::new(provider.clone(), config)?.with_events(events_tx);

    console.print_banner(&provider.model());

    loop {
        let input = match console.read_input() {
            Ok(input) => input,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                console.print_error(&format!("Failed to read input: {}", e));
                break;
            }
        };

        if input.is_empty() || matches!(input.as_str(), "exit" | "quit" | "q") {
            break;
        }

        let cancel = CancellationToken::new();
        agent.set_cancellation_token(cancel.clone());

        let outcome = {
            let run = agent.run(&input);
            tokio::pin!(run);

            loop {
                tokio::select! {
                    outcome = &mut run => break outcome,
                    Some(event) = events_rx.recv() => console.print_event(&event),
                    _ = tokio::signal::ctrl_c(), if !cancel.is_cancelled() => {
                        tracing::info!("Ctrl-C received, cancelling run");
                        cancel.cancel();
                    }
                }
            }
        };

        while let Ok(event) = events_rx.try_recv() {
            console.print_event(&event);
        }

        match outcome {
            Ok(_) => console.print_todos(agent.todos()),
            Err(AgentError::Cancelled) => console.print_system("Request cancelled."),
            Err(e) => console.print_error(&e.to_string()),
        }
        println!();
    }

    tracing::info!("=== Todo Agent Shutting Down ===");

    Ok(())
}
