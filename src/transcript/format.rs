//! Verbose-transcript formatter
//!
//! Recovers (code executed, captured result) from the unstructured verbose
//! log some agent runtimes print for humans: ANSI-colored, with an
//! `Invoking:` marker per tool call and `> Finished chain.` boilerplate at
//! the end. This is a compatibility shim; runtimes that emit structured
//! trace events go through [`crate::transcript::events`] instead.
//!
//! The formatter is total. Malformed input degrades to a coarser block
//! rather than an error, so it can run inline in the chat path.

use std::sync::OnceLock;

use regex::Regex;

use super::block::{join_blocks, BlockKind, FormattedBlock};
use super::labels::Labels;

/// Marker preceding a serialized tool call in the verbose log.
const INVOKE_MARKER: &str = "Invoking: `";
/// Separator between the tool name and its serialized argument.
const WITH_MARKER: &str = "` with `";
/// Trailing boilerplate printed after the last observation.
const CHAIN_FINISHED_MARKER: &str = "> Finished chain.";

/// One recognized code-execution call in a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ToolInvocation {
    /// The serialized argument, as printed between the marker's backticks
    argument: String,
    /// Byte offset just past the marker line in the cleaned transcript
    end: usize,
}

/// Format a raw agent execution transcript for display.
///
/// Produces zero or more Markdown blocks: the code the agent executed, the
/// output that code produced, or (when no tool invocation is recognized) a
/// whole-log fallback. Content that duplicates `final_answer` is removed,
/// since the answer is displayed separately. Returns an empty string when
/// the transcript holds nothing beyond the answer.
#[must_use]
pub fn format_transcript(raw_transcript: &str, final_answer: &str, labels: &Labels) -> String {
    let transcript = strip_ansi(raw_transcript);
    let transcript = transcript.trim();
    let answer = strip_ansi(final_answer);
    let answer = answer.trim();

    let mut blocks = Vec::new();

    if let Some(invocation) = find_invocation(transcript) {
        blocks.push(FormattedBlock {
            kind: BlockKind::CodeExecuted,
            body: invocation.snippet(),
        });
        if let Some(observation) = extract_observation(transcript, invocation.end, answer) {
            blocks.push(FormattedBlock {
                kind: BlockKind::Result,
                body: observation,
            });
        }
    } else if !transcript.is_empty() && transcript != answer {
        blocks.push(FormattedBlock {
            kind: BlockKind::AgentLog,
            body: transcript.to_string(),
        });
    }

    join_blocks(&blocks, labels)
}

/// Remove ANSI escape sequences (CSI codes such as colors and cursor moves).
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    let pattern = ANSI.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("hard-coded pattern compiles")
    });
    pattern.replace_all(text, "").into_owned()
}

/// Locate the first tool invocation in a cleaned transcript.
///
/// The serialized argument runs to the end of the marker line; a closing
/// backtick, when present, is stripped.
fn find_invocation(transcript: &str) -> Option<ToolInvocation> {
    let start = transcript.find(INVOKE_MARKER)?;
    let after_marker = &transcript[start + INVOKE_MARKER.len()..];
    let with = after_marker.find(WITH_MARKER)?;
    let after_with = &after_marker[with + WITH_MARKER.len()..];

    let line_end = after_with.find('\n').unwrap_or(after_with.len());
    let argument = after_with[..line_end]
        .trim_end()
        .trim_end_matches('`')
        .to_string();
    let end = start + INVOKE_MARKER.len() + with + WITH_MARKER.len() + line_end;

    Some(ToolInvocation { argument, end })
}

impl ToolInvocation {
    /// Recover the executable snippet from the serialized argument.
    ///
    /// Tries a strict JSON object parse first, then a regex over the quoting
    /// patterns the runtime has been seen to emit, and finally falls back to
    /// the raw argument so a malformed call still shows up in the output.
    fn snippet(&self) -> String {
        if let Some(snippet) = parse_query_json(&self.argument) {
            return snippet;
        }
        if let Some(snippet) = extract_query_regex(&self.argument) {
            return snippet;
        }
        self.argument.clone()
    }
}

/// Parse the argument as a JSON object and pull out its `query` value.
fn parse_query_json(argument: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(argument).ok()?;
    value.get("query")?.as_str().map(str::to_string)
}

/// Regex extraction of a quoted `query` value from a malformed literal.
///
/// Best effort: matches a single- or double-quoted value after a `query`
/// key. Not a general parser for every escaping discipline the runtime
/// might emit.
fn extract_query_regex(argument: &str) -> Option<String> {
    static QUERY: OnceLock<Regex> = OnceLock::new();
    let pattern = QUERY.get_or_init(|| {
        Regex::new(r#"['"]query['"]\s*:\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#)
            .expect("hard-coded pattern compiles")
    });
    let caps = pattern.captures(argument)?;
    let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
    Some(unescape(raw))
}

/// Undo common backslash escapes. Malformed sequences pass through unchanged.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Extract the observation following an invocation marker line.
///
/// Stops at the chain-finished boilerplate when present, removes exact
/// occurrences of the final answer, and trims. Returns `None` when nothing
/// is left, in which case no block is emitted.
fn extract_observation(transcript: &str, from: usize, answer: &str) -> Option<String> {
    let tail = &transcript[from..];
    let tail = match tail.find(CHAIN_FINISHED_MARKER) {
        Some(idx) => &tail[..idx],
        None => tail,
    };

    let cleaned = if answer.is_empty() {
        tail.to_string()
    } else {
        tail.replace(answer, "")
    };
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
