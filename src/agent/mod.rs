//! Agent loop
//!
//! - `LoopState` - Pure state machine for one session
//! - `ReminderPolicy` - When to nag about the todo list
//! - `TodoAgent` - Async driver doing the model calls and tool dispatch
//! - `AgentConfig` - Builder for everything the agent needs

pub mod agent_loop;
pub mod config;
pub mod reminder;
pub mod state;
pub mod system_prompt;

pub use agent_loop::TodoAgent;
pub use config::{AgentConfig, DEFAULT_MAX_ROUNDS};
pub use reminder::{ReminderPolicy, DEFAULT_NAG_THRESHOLD, INITIAL_REMINDER, NAG_REMINDER};
pub use state::LoopState;
pub use system_prompt::default_system_prompt;
