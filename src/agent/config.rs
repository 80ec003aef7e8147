//! Agent Configuration
//!
//! Configuration options for the `TodoAgent`.

use std::path::PathBuf;
use std::time::Duration;

use super::reminder::DEFAULT_NAG_THRESHOLD;
use super::system_prompt::default_system_prompt;
use crate::tools::common::bash::DEFAULT_TIMEOUT;

/// Default cap on model calls per run
pub const DEFAULT_MAX_ROUNDS: usize = 100;

/// Configuration for a `TodoAgent`
///
/// Use the builder pattern to configure the agent:
///
/// ```ignore
/// let config = AgentConfig::for_workdir("/path/to/project")
///     .with_max_rounds(50)
///     .with_nag_threshold(3)
///     .with_parallel_tools(true)
///     .with_debug_dir("debug");
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// System prompt for the LLM
    pub system_prompt: String,

    /// Workspace root for file and shell tools
    pub workdir: PathBuf,

    /// Maximum number of model calls per run (prevents infinite loops)
    pub max_rounds: usize,

    /// Rounds without a todo update tolerated before the nag is injected
    pub nag_threshold: usize,

    /// Whether file and shell tools within one round may run concurrently
    pub parallel_tools: bool,

    /// Where to write request/response traces (disabled when `None`)
    pub debug_dir: Option<PathBuf>,

    /// Timeout for a single bash command
    pub bash_timeout: Duration,
}

impl AgentConfig {
    /// Create a configuration with an explicit system prompt and workspace
    pub fn new(system_prompt: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            workdir: workdir.into(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            nag_threshold: DEFAULT_NAG_THRESHOLD,
            parallel_tools: false,
            debug_dir: None,
            bash_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a configuration with the default system prompt for `workdir`
    pub fn for_workdir(workdir: impl Into<PathBuf>) -> Self {
        let workdir = workdir.into();
        Self::new(default_system_prompt(&workdir), workdir)
    }

    /// Replace the system prompt
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Set maximum model calls per run
    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    /// Set the nag threshold
    pub fn with_nag_threshold(mut self, threshold: usize) -> Self {
        self.nag_threshold = threshold;
        self
    }

    /// Enable or disable concurrent execution of file and shell tools
    ///
    /// Todo updates always run one at a time on the loop task.
    pub fn with_parallel_tools(mut self, enabled: bool) -> Self {
        self.parallel_tools = enabled;
        self
    }

    /// Enable request/response tracing into `dir`
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    /// Set the bash command timeout
    pub fn with_bash_timeout(mut self, timeout: Duration) -> Self {
        self.bash_timeout = timeout;
        self
    }
}
