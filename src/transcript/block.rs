//! Formatted output blocks
//!
//! A formatted transcript is an ordered list of labeled blocks rendered as
//! Markdown: a bold heading followed by a fenced code block.

use super::labels::Labels;

/// The kind of a formatted block. Selects the label and the code fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Code the agent's execution tool actually ran
    CodeExecuted,
    /// Output captured from running that code
    Result,
    /// Whole-log fallback when no tool invocation was recognized
    AgentLog,
}

/// A labeled section of formatted transcript output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBlock {
    /// Which kind of section this is
    pub kind: BlockKind,
    /// The section body, without surrounding markup
    pub body: String,
}

impl FormattedBlock {
    /// Render the block as Markdown using the given label set.
    #[must_use]
    pub fn render(&self, labels: &Labels) -> String {
        let (label, fence) = match self.kind {
            BlockKind::CodeExecuted => (&labels.code_executed, "python"),
            BlockKind::Result => (&labels.result, "text"),
            BlockKind::AgentLog => (&labels.agent_log, "text"),
        };
        format!("**{label}:**\n```{fence}\n{}\n```", self.body)
    }
}

/// Join rendered blocks with a blank-line separator.
///
/// An empty slice renders to an empty string, signalling that there is
/// nothing to show beyond the answer itself.
#[must_use]
pub fn join_blocks(blocks: &[FormattedBlock], labels: &Labels) -> String {
    blocks
        .iter()
        .map(|block| block.render(labels))
        .collect::<Vec<_>>()
        .join("\n\n")
}
