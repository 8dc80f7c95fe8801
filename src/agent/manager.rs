//! Agent lifecycle management
//!
//! The prepared agent is cached and rebuilt when the accessibility settings
//! change, so toggling a setting takes effect on the next question without
//! restarting the session.

use serde::{Deserialize, Serialize};

use crate::agent::prompt::build_prompt;
use crate::data::Table;

/// Settings that shape the agent's prompt and capabilities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentSettings {
    /// Model identifier forwarded to the agent command
    #[serde(default = "default_model")]
    pub model: String,
    /// Whether the agent may produce plots
    #[serde(default)]
    pub include_visualisations: bool,
    /// Whether answers should use plain language
    #[serde(default)]
    pub simple_language: bool,
}

fn default_model() -> String {
    "gpt-4.1-nano".to_string()
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            include_visualisations: false,
            simple_language: false,
        }
    }
}

/// A prepared agent: the system prompt and the settings it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedAgent {
    /// System prompt for the agent command
    pub prompt: String,
    /// Settings snapshot the prompt was built from
    pub settings: AgentSettings,
}

/// Caches the prepared agent and rebuilds it when settings change.
#[derive(Debug, Default)]
pub struct AgentManager {
    current: Option<PreparedAgent>,
}

impl AgentManager {
    /// Create a manager with no prepared agent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the prepared agent for the given settings.
    ///
    /// Rebuilds the prompt when no agent exists yet or when the settings
    /// differ from the ones the cached agent was built with.
    pub fn get_or_rebuild(&mut self, table: &Table, settings: &AgentSettings) -> &PreparedAgent {
        if self
            .current
            .as_ref()
            .is_some_and(|agent| agent.settings != *settings)
        {
            self.current = None;
        }
        self.current.get_or_insert_with(|| PreparedAgent {
            prompt: build_prompt(table, settings),
            settings: settings.clone(),
        })
    }
}
