//! Session state and chat history
//!
//! One interactive session at a time: the dataset, the accessibility
//! settings, the ordered in-memory conversation, and the agent cache.

pub mod history;
pub mod state;

pub use history::{ChatHistory, ChatMessage, ChatRole};
pub use state::SessionState;
