//! Application configuration parser
//!
//! Parses `tablechat.toml` into structured settings for the agent command,
//! the dataset, and the chat UI.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::agent::manager::AgentSettings;
use crate::transcript::Locale;

/// Agent command configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Program to run for each question
    pub command: String,
    /// Extra arguments placed before the model/prompt/question flags
    #[serde(default)]
    pub args: Vec<String>,
    /// Model identifier forwarded to the agent command
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "gpt-4.1-nano".to_string()
}

/// Dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Path to the CSV file to analyze
    pub path: PathBuf,
    /// Display name; the file stem is used when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Chat UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Locale for block labels and UI text
    #[serde(default)]
    pub locale: Locale,
    /// Whether to show process output (code, results) alongside answers
    #[serde(default = "default_show_code")]
    pub show_code: bool,
    /// Whether the agent may produce plots
    #[serde(default)]
    pub include_visualisations: bool,
    /// Whether answers should use plain language
    #[serde(default)]
    pub simple_language: bool,
}

const fn default_show_code() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            show_code: true,
            include_visualisations: false,
            simple_language: false,
        }
    }
}

/// Top-level configuration parsed from `tablechat.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Agent command configuration
    pub agent: AgentConfig,
    /// Dataset configuration
    pub dataset: DatasetConfig,
    /// Chat UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Parse a configuration file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration content from a string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse tablechat.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Agent settings derived from the config.
    #[must_use]
    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            model: self.agent.model.clone(),
            include_visualisations: self.ui.include_visualisations,
            simple_language: self.ui.simple_language,
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.agent.command.trim().is_empty() {
            bail!("Agent command cannot be empty");
        }
        if self.agent.model.trim().is_empty() {
            bail!("Agent model cannot be empty");
        }
        if self.dataset.path.as_os_str().is_empty() {
            bail!("Dataset path cannot be empty");
        }
        Ok(())
    }
}
