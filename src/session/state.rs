//! Session state
//!
//! Owns everything one interactive session needs: the dataset, the
//! accessibility settings, the conversation, and the agent cache. A new
//! dataset means a new session; only the conversation can be reset in
//! place.

use crate::agent::manager::{AgentManager, AgentSettings, PreparedAgent};
use crate::agent::runtime::AgentReply;
use crate::data::Table;
use crate::session::history::{ChatHistory, ChatMessage};
use crate::transcript::Labels;

/// State for one interactive chat session.
#[derive(Debug)]
pub struct SessionState {
    /// The loaded dataset
    pub table: Table,
    /// Current accessibility settings
    pub settings: AgentSettings,
    /// Whether process output (code, results) is shown alongside answers
    pub show_code: bool,
    /// The conversation so far
    pub history: ChatHistory,
    /// Agent cache, rebuilt when settings change
    pub agent: AgentManager,
}

impl SessionState {
    /// Create a fresh session for a loaded dataset.
    #[must_use]
    pub fn new(table: Table, settings: AgentSettings, show_code: bool) -> Self {
        Self {
            table,
            settings,
            show_code,
            history: ChatHistory::new(),
            agent: AgentManager::new(),
        }
    }

    /// The prepared agent for the current settings, rebuilding on change.
    pub fn prepared_agent(&mut self) -> &PreparedAgent {
        self.agent.get_or_rebuild(&self.table, &self.settings)
    }

    /// Record a completed turn in arrival order.
    ///
    /// The question and the reply become two history entries; process
    /// output is attached only when `show_code` is enabled.
    pub fn record_turn(
        &mut self,
        question: &str,
        reply: &AgentReply,
        labels: &Labels,
        plot: Option<Vec<u8>>,
    ) {
        self.history.append(ChatMessage::user(question));

        let formatted = if self.show_code {
            Some(reply.formatted_output(labels))
        } else {
            None
        };
        self.history
            .append(ChatMessage::assistant(&reply.answer, formatted, plot));
    }

    /// Record a failed turn: the question plus the standing apology.
    pub fn record_failed_turn(&mut self, question: &str, labels: &Labels) {
        self.history.append(ChatMessage::user(question));
        self.history
            .append(ChatMessage::assistant(&labels.apology, None, None));
    }

    /// Reset the conversation, keeping the dataset and settings.
    pub fn reset_conversation(&mut self) {
        self.history.clear();
    }
}
