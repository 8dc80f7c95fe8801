//! Tablechat - Chat with your tabular data
//!
//! Tablechat wires a language-model data-analysis agent to a terminal chat
//! interface. The agent translates questions into executable analysis code;
//! tablechat recovers what was actually executed from the agent's trace and
//! renders it alongside the answer.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod agent;
pub mod cli;
pub mod config;
pub mod data;
pub mod plot;
pub mod session;
pub mod transcript;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use agent::manager::{AgentManager, AgentSettings, PreparedAgent};
pub use agent::runtime::{AgentReply, AgentRuntime, AgentTranscript, CommandRuntime};
pub use agent::stream::{parse_event, TraceAccumulator, TraceEvent};
pub use cli::ChatDisplay;
pub use config::AppConfig;
pub use data::Table;
pub use plot::PlotRegistry;
pub use session::{ChatHistory, ChatMessage, ChatRole, SessionState};
pub use transcript::{format_events, format_transcript, Labels, Locale};
