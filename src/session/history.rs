//! In-memory chat history
//!
//! Ordered record of the conversation. History lives for the session only;
//! nothing is persisted to disk.

use chrono::{DateTime, Utc};

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// The person asking questions
    User,
    /// The analysis agent
    Assistant,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Who produced the message
    pub role: ChatRole,
    /// The message text (question, or final answer)
    pub content: String,
    /// Rendered process blocks (code executed, results), when any exist
    pub formatted_output: Option<String>,
    /// PNG bytes of a figure produced during the turn
    pub plot: Option<Vec<u8>>,
    /// When the message was recorded
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message.
    #[must_use]
    pub fn user(content: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: content.to_string(),
            formatted_output: None,
            plot: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message.
    ///
    /// An empty `formatted_output` string means the formatter found nothing
    /// beyond the answer; it is stored as `None` so rendering can skip it.
    #[must_use]
    pub fn assistant(
        content: &str,
        formatted_output: Option<String>,
        plot: Option<Vec<u8>>,
    ) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.to_string(),
            formatted_output: formatted_output.filter(|output| !output.is_empty()),
            plot,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only, arrival-ordered conversation record.
#[derive(Debug, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// All messages, in arrival order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent message, if any.
    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Remove all messages, starting a fresh conversation.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
