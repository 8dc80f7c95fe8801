//! Terminal chat rendering
//!
//! Renders chat turns as colored terminal output: the user's question, the
//! agent's process blocks, a figure notice, and the answer. Chat content
//! goes to stdout; status and errors go to stderr.

use colored::Colorize;

use crate::data::Table;
use crate::session::{ChatMessage, ChatRole};
use crate::transcript::Labels;

/// Display handler for the chat session.
pub struct ChatDisplay {
    labels: Labels,
}

impl ChatDisplay {
    /// Create a display handler with the given label set.
    #[must_use]
    pub const fn new(labels: Labels) -> Self {
        Self { labels }
    }

    /// Print the session banner: dataset summary and usage hint.
    pub fn print_banner(&self, table: &Table) {
        println!("{}", "=== tablechat ===".bold().cyan());
        println!("{} {}", "Dataset:".dimmed(), table.summary());
        println!(
            "{}",
            "Ask a question about the data. Commands: /plots on|off, /simple on|off, /reset, /quit"
                .dimmed()
        );
        println!("{}", "─".repeat(50).dimmed());
    }

    /// Render one chat message to stdout.
    pub fn render_message(&self, message: &ChatMessage) {
        match message.role {
            ChatRole::User => {
                println!("\n{} {}", "You:".bold().blue(), message.content);
            }
            ChatRole::Assistant => {
                if let Some(formatted) = &message.formatted_output {
                    println!("\n{formatted}");
                }
                if let Some(plot) = &message.plot {
                    println!("\n{} figure captured ({} bytes)", "▣".magenta(), plot.len());
                }
                if !message.content.is_empty() {
                    println!(
                        "\n{} {}",
                        format!("{}:", self.labels.answer).bold().green(),
                        message.content
                    );
                }
            }
        }
    }

    /// Report a non-fatal error to stderr.
    pub fn render_error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant_message() -> ChatMessage {
        ChatMessage::assistant(
            "There are 891 rows.",
            Some("**Code Executed:**\n```python\ndf.shape[0]\n```".to_string()),
            Some(vec![1, 2, 3]),
        )
    }

    // Rendering goes straight to the terminal; these tests pin down that no
    // message shape panics.
    #[test]
    fn test_render_all_message_shapes_no_panic() {
        let display = ChatDisplay::new(Labels::default());

        display.render_message(&ChatMessage::user("How many rows?"));
        display.render_message(&assistant_message());
        display.render_message(&ChatMessage::assistant("bare answer", None, None));
        display.render_message(&ChatMessage::assistant("", None, None));
        display.render_error("agent failed");
    }

    #[test]
    fn test_render_with_german_labels_no_panic() {
        let display = ChatDisplay::new(Labels::german());
        display.render_message(&assistant_message());
    }
}
