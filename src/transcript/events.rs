//! Structured-trace formatting
//!
//! Preferred path for runtimes that emit trace events instead of a
//! human-readable log: invocation inputs arrive as JSON and observations as
//! separate events, so no heuristic parsing is needed. Produces the same
//! block output as the verbose-text shim in [`crate::transcript::format`].

use serde_json::Value;

use crate::agent::stream::TraceEvent;

use super::block::{join_blocks, BlockKind, FormattedBlock};
use super::labels::Labels;

/// Format a structured agent trace for display.
///
/// Code-execution invocations become code blocks (the `query` value of the
/// input when present, the whole input otherwise), observations become
/// result blocks with any echo of `final_answer` removed. Returns an empty
/// string when the trace holds nothing beyond the answer.
#[must_use]
pub fn format_events(events: &[TraceEvent], final_answer: &str, labels: &Labels) -> String {
    let answer = final_answer.trim();
    let mut blocks = Vec::new();

    for event in events {
        match event {
            TraceEvent::ToolInvocation { input, .. } => {
                let snippet = input
                    .get("query")
                    .and_then(Value::as_str)
                    .map_or_else(|| input.to_string(), str::to_string);
                blocks.push(FormattedBlock {
                    kind: BlockKind::CodeExecuted,
                    body: snippet,
                });
            }
            TraceEvent::Observation { content } => {
                let cleaned = if answer.is_empty() {
                    content.clone()
                } else {
                    content.replace(answer, "")
                };
                let cleaned = cleaned.trim();
                if !cleaned.is_empty() {
                    blocks.push(FormattedBlock {
                        kind: BlockKind::Result,
                        body: cleaned.to_string(),
                    });
                }
            }
            // Plots are attached to the turn separately; the final answer
            // is displayed separately; unknown events carry no content.
            TraceEvent::Plot { .. }
            | TraceEvent::FinalAnswer { .. }
            | TraceEvent::Unknown { .. } => {}
        }
    }

    join_blocks(&blocks, labels)
}
