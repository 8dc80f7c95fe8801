//! Trace-event parser for the analysis agent's stdout
//!
//! Agents with structured tracing emit newline-delimited JSON events, one
//! per line. Lines that fail to parse as events are kept verbatim, so a
//! runtime that only prints a human-readable verbose log still yields a
//! usable transcript (formatted by the text shim instead of the event
//! path).

use std::path::PathBuf;

use serde_json::Value;

/// A parsed event from the agent's trace stream
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// The agent invoked a tool with the given input
    ToolInvocation {
        /// Tool name (e.g., "python_repl_ast")
        tool_name: String,
        /// Tool input as raw JSON
        input: Value,
    },
    /// Output captured from executing the last tool invocation
    Observation {
        /// The captured text
        content: String,
    },
    /// A figure the execution sandbox rendered to disk
    Plot {
        /// Path of the exported PNG
        path: PathBuf,
    },
    /// The agent's final natural-language answer for the turn
    FinalAnswer {
        /// The answer text
        text: String,
    },
    /// Unrecognized event type
    Unknown {
        /// The raw event type string
        event_type: String,
    },
}

/// Parse a single trace line into a `TraceEvent`.
///
/// Returns `None` if the line is empty or not a JSON event object.
#[must_use]
pub fn parse_event(line: &str) -> Option<TraceEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let value: Value = serde_json::from_str(line).ok()?;
    let event_type = value.get("type")?.as_str()?;

    match event_type {
        "tool_use" => Some(parse_tool_use(&value)),
        "observation" => Some(TraceEvent::Observation {
            content: value
                .get("content")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
        }),
        "plot" => Some(parse_plot(&value)),
        "result" => Some(TraceEvent::FinalAnswer {
            text: value
                .get("answer")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
        }),
        other => Some(TraceEvent::Unknown {
            event_type: other.to_string(),
        }),
    }
}

fn parse_tool_use(value: &Value) -> TraceEvent {
    let tool_name = value
        .get("tool")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let input = value.get("input").cloned().unwrap_or(Value::Null);

    TraceEvent::ToolInvocation { tool_name, input }
}

fn parse_plot(value: &Value) -> TraceEvent {
    value.get("path").and_then(Value::as_str).map_or(
        TraceEvent::Unknown {
            event_type: "plot".to_string(),
        },
        |path| TraceEvent::Plot {
            path: PathBuf::from(path),
        },
    )
}

/// Accumulator for agent stdout, separating structured events from raw log
/// text and collecting the answer and exported figures along the way.
#[derive(Debug, Default)]
pub struct TraceAccumulator {
    /// Structured events, in arrival order
    pub events: Vec<TraceEvent>,
    /// Lines that were not structured events
    pub raw_lines: Vec<String>,
    /// Final answer (populated from the result event)
    pub answer: Option<String>,
    /// Figure paths exported during the run
    pub plots: Vec<PathBuf>,
}

impl TraceAccumulator {
    /// Create a new empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one line of agent stdout.
    pub fn process_line(&mut self, line: &str) {
        match parse_event(line) {
            Some(TraceEvent::FinalAnswer { text }) => {
                self.answer = Some(text.clone());
                self.events.push(TraceEvent::FinalAnswer { text });
            }
            Some(TraceEvent::Plot { path }) => {
                self.plots.push(path.clone());
                self.events.push(TraceEvent::Plot { path });
            }
            Some(event) => self.events.push(event),
            None => {
                if !line.trim().is_empty() {
                    self.raw_lines.push(line.to_string());
                }
            }
        }
    }

    /// Whether any structured events were seen.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// The raw log text accumulated from non-event lines.
    #[must_use]
    pub fn raw_log(&self) -> String {
        self.raw_lines.join("\n")
    }
}
