//! Conversation history for a single agent session

pub mod transcript;
pub mod turn;

pub use transcript::Transcript;
pub use turn::ConversationTurn;
