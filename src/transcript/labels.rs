//! Localized labels for formatted output
//!
//! The chat UI ships in English and German; block labels and the standing
//! apology message are a lookup table keyed by locale, not fixed strings.

use serde::{Deserialize, Serialize};

/// Supported UI locales.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English labels
    #[default]
    En,
    /// German labels
    De,
}

/// Label set used when rendering formatted blocks and chat output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Heading for the code the agent executed
    pub code_executed: String,
    /// Heading for the captured execution output
    pub result: String,
    /// Heading for the whole-log fallback block
    pub agent_log: String,
    /// Caption shown before the agent's final answer
    pub answer: String,
    /// Message shown when the agent invocation itself fails
    pub apology: String,
}

impl Labels {
    /// English label set.
    #[must_use]
    pub fn english() -> Self {
        Self {
            code_executed: "Code Executed".to_string(),
            result: "Result".to_string(),
            agent_log: "Agent Log".to_string(),
            answer: "Answer".to_string(),
            apology: "Sorry, something went wrong while answering your question. \
                      Please try again."
                .to_string(),
        }
    }

    /// German label set.
    #[must_use]
    pub fn german() -> Self {
        Self {
            code_executed: "Ausgeführter Code".to_string(),
            result: "Ergebnis".to_string(),
            agent_log: "Agenten-Protokoll".to_string(),
            answer: "Antwort".to_string(),
            apology: "Entschuldigung, bei der Beantwortung Ihrer Frage ist ein Fehler \
                      aufgetreten. Bitte versuchen Sie es erneut."
                .to_string(),
        }
    }

    /// Label set for a locale.
    #[must_use]
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::english(),
            Locale::De => Self::german(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}
