//! Agent driver
//!
//! `TodoAgent` owns the session: loop state, todo list, tools and the model
//! boundary. `run` steps the state machine, doing the I/O each phase asks
//! for, until the phase is terminal.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use super::config::AgentConfig;
use super::reminder::{ReminderPolicy, INITIAL_REMINDER};
use super::state::LoopState;
use crate::conversation::{ConversationTurn, Transcript};
use crate::core::{AgentError, AgentEvent, LoopPhase};
use crate::helpers::{Debugger, TodoManager};
use crate::llm::{ContentBlock, LlmProvider, ToolDefinition};
use crate::tools::{ToolDispatcher, ToolInvocation};

/// Agent that keeps a todo list while working through a task
pub struct TodoAgent {
    provider: Arc<dyn LlmProvider>,
    config: AgentConfig,
    dispatcher: ToolDispatcher,
    todos: TodoManager,
    policy: ReminderPolicy,
    /// Last round-boundary state, `None` until the first run
    state: Option<LoopState>,
    cancel: CancellationToken,
    events: Option<UnboundedSender<AgentEvent>>,
    debugger: Debugger,
}

impl TodoAgent {
    /// Assemble an agent from a model boundary and configuration
    pub fn new(provider: Arc<dyn LlmProvider>, config: AgentConfig) -> Result<Self, AgentError> {
        let dispatcher = ToolDispatcher::new(&config)?;

        let debugger = match &config.debug_dir {
            Some(dir) => Debugger::new(dir).map_err(|e| AgentError::InvalidConfig(format!("{:#}", e)))?,
            None => Debugger::disabled(),
        };

        tracing::info!(
            "[TodoAgent] Created with provider {} (model {})",
            provider.provider_name(),
            provider.model()
        );

        Ok(Self {
            provider,
            policy: ReminderPolicy::new(config.nag_threshold),
            config,
            dispatcher,
            todos: TodoManager::new(),
            state: None,
            cancel: CancellationToken::new(),
            events: None,
            debugger,
        })
    }

    /// Send progress events to `sender`
    pub fn with_events(mut self, sender: UnboundedSender<AgentEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Replace the token that cancels runs
    pub fn set_cancellation_token(&mut self, token: CancellationToken) {
        self.cancel = token;
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn todos(&self) -> &TodoManager {
        &self.todos
    }

    /// Session state, once a run has started
    pub fn state(&self) -> Option<&LoopState> {
        self.state.as_ref()
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.state.as_ref().map(LoopState::transcript)
    }

    /// Run one prompt to completion
    ///
    /// The first call opens the session; later calls continue it with the
    /// same history and todo list. If the returned future is dropped early,
    /// the session keeps the state of the last completed round and the next
    /// call continues from there.
    pub async fn run(&mut self, prompt: &str) -> Result<String, AgentError> {
        let mut state = match self.state.take() {
            Some(state) => state.resume(prompt),
            None => {
                self.emit(AgentEvent::Reminder(INITIAL_REMINDER.to_string()));
                LoopState::start(prompt)
            }
        };
        self.checkpoint(&state);

        let definitions = self.dispatcher.definitions().to_vec();
        let mut model_calls = 0;

        tracing::info!("[TodoAgent] Starting run");

        while !state.terminated() {
            let phase = state.phase().clone();
            state = match phase {
                LoopPhase::AwaitingModel if self.cancel.is_cancelled() => state.fail(AgentError::Cancelled),
                LoopPhase::AwaitingModel if model_calls >= self.config.max_rounds => {
                    tracing::warn!("[TodoAgent] Max rounds ({}) reached", self.config.max_rounds);
                    state.fail(AgentError::RoundLimit(self.config.max_rounds))
                }
                LoopPhase::AwaitingModel => {
                    model_calls += 1;
                    self.call_model(state, &definitions, model_calls).await
                }
                LoopPhase::Dispatching(invocations) => self.dispatch_round(state, &invocations).await,
                LoopPhase::Terminated { .. } | LoopPhase::Failed(_) => break,
            };
            self.checkpoint(&state);
        }

        let outcome = state
            .outcome()
            .unwrap_or_else(|| Err(AgentError::Boundary("run ended without an outcome".to_string())));
        self.state = Some(state);

        match &outcome {
            Ok(_) => tracing::info!("[TodoAgent] Run finished after {} model calls", model_calls),
            Err(e) => tracing::error!("[TodoAgent] Run failed: {}", e),
        }

        outcome
    }

    async fn call_model(&self, state: LoopState, definitions: &[ToolDefinition], call: usize) -> LoopState {
        let messages = state.transcript().to_messages();

        tracing::info!(
            "[TodoAgent] Calling LLM with {} messages (call {})",
            messages.len(),
            call
        );

        if let Err(e) = self
            .debugger
            .log_api_request(&messages, Some(&self.config.system_prompt), definitions)
        {
            tracing::warn!("[TodoAgent] Failed to log API request: {}", e);
        }

        let response = tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::info!("[TodoAgent] Cancelled during model call");
                return state.fail(AgentError::Cancelled);
            }
            response = self.provider.send_with_tools(
                messages,
                Some(&self.config.system_prompt),
                definitions.to_vec(),
            ) => response,
        };

        let raw = match response {
            Ok(raw) => raw,
            Err(e) => return state.fail(AgentError::Boundary(format!("{:#}", e))),
        };

        tracing::debug!("[TodoAgent] Response body: {} bytes", raw.len());
        if let Err(e) = self.debugger.log_api_response(&raw) {
            tracing::warn!("[TodoAgent] Failed to log API response: {}", e);
        }

        let state = state.apply_response(&raw);

        if let Some(ConversationTurn::Assistant { content }) = state.transcript().last() {
            for text in content.iter().filter_map(ContentBlock::as_text) {
                self.emit(AgentEvent::Text(text.to_string()));
            }
        }

        state
    }

    async fn dispatch_round(&mut self, state: LoopState, invocations: &[ToolInvocation]) -> LoopState {
        for invocation in invocations {
            tracing::info!("[TodoAgent] Tool use: {} ({})", invocation.name, invocation.id);
            if let Err(e) = self
                .debugger
                .log_tool_call(&invocation.name, &invocation.id, &invocation.input)
            {
                tracing::warn!("[TodoAgent] Failed to log tool call: {}", e);
            }
            self.emit(AgentEvent::ToolCall {
                id: invocation.id.clone(),
                name: invocation.name.clone(),
                input: invocation.input.clone(),
            });
        }

        let outcomes = self.dispatcher.dispatch_all(&mut self.todos, invocations).await;

        for (invocation, outcome) in invocations.iter().zip(&outcomes) {
            if let Err(e) = self.debugger.log_tool_result(&invocation.name, &outcome.result) {
                tracing::warn!("[TodoAgent] Failed to log tool result: {}", e);
            }
            self.emit(AgentEvent::ToolResult {
                id: outcome.result.tool_use_id.clone(),
                name: invocation.name.clone(),
                output: outcome.result.output.clone(),
                is_error: outcome.result.is_error,
            });
        }

        let state = state.apply_results(&outcomes, &self.policy);

        if let Some(ConversationTurn::Reminder { text }) = state.transcript().last() {
            tracing::info!("[TodoAgent] Injected todo reminder after round {}", state.rounds());
            self.emit(AgentEvent::Reminder(text.clone()));
        }

        state
    }

    /// Keep `state` on the agent unless it is mid-round
    ///
    /// A `Dispatching` state holds tool calls without their results, which
    /// the model would reject if the session continued from it.
    fn checkpoint(&mut self, state: &LoopState) {
        if !matches!(state.phase(), LoopPhase::Dispatching(_)) {
            self.state = Some(state.clone());
        }
    }

    fn emit(&self, event: AgentEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}
