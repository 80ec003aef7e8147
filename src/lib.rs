pub mod core;
pub mod tools;

// Session history and the todo list
pub mod conversation;
pub mod helpers;

// The agent loop and its reminder policy
pub mod agent;

// Model boundary
pub mod llm;

// Optional components
pub mod cli;
pub mod logging;
