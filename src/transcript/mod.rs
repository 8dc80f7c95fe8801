//! Transcript parsing and formatting
//!
//! This module recovers a structured, display-ready record of what an
//! analysis agent actually did during a turn: the code it executed and the
//! output that code produced. Two paths produce the same block output:
//! the structured event path in [`events`] (preferred when the runtime
//! emits trace events) and the verbose-text shim in [`format`] for
//! runtimes that only print a human-readable log.

pub mod block;
pub mod events;
pub mod format;
pub mod labels;

pub use block::{BlockKind, FormattedBlock};
pub use events::format_events;
pub use format::format_transcript;
pub use labels::{Labels, Locale};
