//! Tool dispatcher
//!
//! Turns tool invocations into typed calls, runs them, and packages the
//! outcome as a `ToolResult`. Every failure below this point becomes an
//! error result for the model; nothing propagates to the loop.

use futures::future::join_all;

use super::common::{todo, BashTool};
use super::edit_tool::EditTool;
use super::read_tool::ReadTool;
use super::write_tool::WriteTool;
use super::schema;
use super::tool::{ToolCall, ToolInvocation, ToolKind, ToolResult, WorkspaceCall};
use super::workspace::Workspace;
use crate::agent::AgentConfig;
use crate::core::{AgentError, ToolExecutionError};
use crate::helpers::TodoManager;
use crate::llm::ToolDefinition;

/// Result of dispatching one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub result: ToolResult,
    /// Whether this invocation successfully replaced the todo list
    pub todo_updated: bool,
}

impl DispatchOutcome {
    fn plain(result: ToolResult) -> Self {
        Self {
            result,
            todo_updated: false,
        }
    }
}

/// Routes invocations to the built-in tools
pub struct ToolDispatcher {
    bash: BashTool,
    read: ReadTool,
    write: WriteTool,
    edit: EditTool,
    definitions: Vec<ToolDefinition>,
    parallel: bool,
}

impl ToolDispatcher {
    /// Build the tool set for `config.workdir`
    ///
    /// Fails if the workspace is not a directory or a tool declaration is
    /// unusable.
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        if !config.workdir.is_dir() {
            return Err(AgentError::InvalidConfig(format!(
                "workspace {} is not a directory",
                config.workdir.display()
            )));
        }

        let definitions: Vec<ToolDefinition> =
            ToolKind::ALL.iter().map(|kind| kind.definition()).collect();
        let expected: Vec<&str> = ToolKind::ALL.iter().map(|kind| kind.name()).collect();
        schema::verify_definitions(&definitions, &expected).map_err(AgentError::InvalidConfig)?;

        let workspace = Workspace::new(&config.workdir);
        tracing::info!(
            "Tool dispatcher ready: {} tools in {}",
            definitions.len(),
            workspace.root().display()
        );

        Ok(Self {
            bash: BashTool::new(workspace.root(), config.bash_timeout),
            read: ReadTool::new(workspace.clone()),
            write: WriteTool::new(workspace.clone()),
            edit: EditTool::new(workspace),
            definitions,
            parallel: config.parallel_tools,
        })
    }

    /// Tool declarations to send with each request
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Dispatch a single invocation
    pub async fn dispatch(&self, todos: &mut TodoManager, invocation: &ToolInvocation) -> DispatchOutcome {
        match ToolCall::parse(&invocation.name, &invocation.input) {
            Ok(ToolCall::Todo(input)) => Self::apply_todos(todos, invocation, &input),
            Ok(ToolCall::Workspace(call)) => self.run_workspace(invocation, call).await,
            Err(e) => {
                tracing::warn!("Rejected tool call {} ({}): {}", invocation.name, invocation.id, e);
                DispatchOutcome::plain(ToolResult::error(&invocation.id, e.to_string()))
            }
        }
    }

    /// Dispatch every invocation of a round, returning outcomes in request order
    pub async fn dispatch_all(
        &self,
        todos: &mut TodoManager,
        invocations: &[ToolInvocation],
    ) -> Vec<DispatchOutcome> {
        if !self.parallel || invocations.len() < 2 {
            let mut outcomes = Vec::with_capacity(invocations.len());
            for invocation in invocations {
                outcomes.push(self.dispatch(todos, invocation).await);
            }
            return outcomes;
        }

        let mut outcomes: Vec<Option<DispatchOutcome>> = vec![None; invocations.len()];
        let mut concurrent = Vec::new();

        for (index, invocation) in invocations.iter().enumerate() {
            match ToolCall::parse(&invocation.name, &invocation.input) {
                Ok(ToolCall::Todo(input)) => {
                    outcomes[index] = Some(Self::apply_todos(todos, invocation, &input));
                }
                Ok(ToolCall::Workspace(call)) => {
                    concurrent.push(async move { (index, self.run_workspace(invocation, call).await) });
                }
                Err(e) => {
                    tracing::warn!("Rejected tool call {} ({}): {}", invocation.name, invocation.id, e);
                    outcomes[index] =
                        Some(DispatchOutcome::plain(ToolResult::error(&invocation.id, e.to_string())));
                }
            }
        }

        tracing::debug!("Running {} tools concurrently", concurrent.len());
        for (index, outcome) in join_all(concurrent).await {
            outcomes[index] = Some(outcome);
        }

        outcomes.into_iter().flatten().collect()
    }

    fn apply_todos(
        todos: &mut TodoManager,
        invocation: &ToolInvocation,
        input: &todo::TodoWriteInput,
    ) -> DispatchOutcome {
        match todo::apply(todos, input) {
            Ok(rendered) => DispatchOutcome {
                result: ToolResult::success(&invocation.id, rendered),
                todo_updated: true,
            },
            Err(e) => {
                tracing::warn!("Todo update rejected ({}): {}", e.reason(), e);
                DispatchOutcome::plain(ToolResult::error(&invocation.id, e.to_string()))
            }
        }
    }

    async fn run_workspace(&self, invocation: &ToolInvocation, call: WorkspaceCall) -> DispatchOutcome {
        tracing::info!("Executing tool: {} ({})", invocation.name, invocation.id);

        let result: Result<String, ToolExecutionError> = match &call {
            WorkspaceCall::Bash(input) => self.bash.run(input).await,
            WorkspaceCall::ReadFile(input) => self.read.read(input),
            WorkspaceCall::WriteFile(input) => self.write.write(input),
            WorkspaceCall::EditFile(input) => self.edit.edit(input),
        };

        match result {
            Ok(output) => DispatchOutcome::plain(ToolResult::success(&invocation.id, output)),
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", invocation.name, e);
                DispatchOutcome::plain(ToolResult::error(&invocation.id, e.to_string()))
            }
        }
    }
}
