//! Analysis-agent integration
//!
//! This module handles everything between a question and a reply: building
//! the system prompt, invoking the agent process, parsing its trace stream,
//! and rebuilding the agent when settings change.

pub mod manager;
pub mod prompt;
pub mod runtime;
pub mod stream;
