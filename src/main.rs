//! Tablechat - Chat with your tabular data
//!
//! CLI entry point for the chat session.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use tablechat::agent::runtime::{AgentRuntime, CommandRuntime};
use tablechat::cli::ChatDisplay;
use tablechat::config::AppConfig;
use tablechat::data::Table;
use tablechat::plot::PlotRegistry;
use tablechat::session::SessionState;
use tablechat::transcript::Labels;

/// Chat-style interface for asking questions about a tabular dataset
///
/// Loads a CSV, hands it to a language-model analysis agent, and renders
/// each turn: the code the agent executed, its output, and the answer.
#[derive(Parser, Debug)]
#[command(name = "tablechat", version, about)]
struct Cli {
    /// Path to the tablechat.toml configuration file
    #[arg(long, default_value = "tablechat.toml")]
    config: PathBuf,

    /// Dataset CSV path (overrides the configured dataset)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Ask a single question and exit instead of starting the chat loop
    #[arg(long)]
    question: Option<String>,
}

/// A line of chat-loop input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplInput {
    /// Ask the agent a question
    Question(String),
    /// Toggle plot generation
    SetPlots(bool),
    /// Toggle plain-language answers
    SetSimple(bool),
    /// Clear the conversation
    Reset,
    /// End the session
    Quit,
    /// Blank line, nothing to do
    Empty,
    /// Unrecognized slash command
    Unknown(String),
}

/// Classify one line of chat-loop input.
fn parse_repl_input(line: &str) -> ReplInput {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }
    if !line.starts_with('/') {
        return ReplInput::Question(line.to_string());
    }
    match line {
        "/quit" | "/exit" => ReplInput::Quit,
        "/reset" => ReplInput::Reset,
        "/plots on" => ReplInput::SetPlots(true),
        "/plots off" => ReplInput::SetPlots(false),
        "/simple on" => ReplInput::SetSimple(true),
        "/simple off" => ReplInput::SetSimple(false),
        other => ReplInput::Unknown(other.to_string()),
    }
}

/// Execute one question-answer turn and render the result.
///
/// The runtime is rebuilt from the cached prepared agent each turn, so a
/// settings change made between turns takes effect immediately. A failed
/// agent invocation is reported and recorded as an apology; it never ends
/// the session.
async fn run_turn(
    state: &mut SessionState,
    config: &AppConfig,
    registry: &Arc<PlotRegistry>,
    labels: &Labels,
    display: &ChatDisplay,
    question: &str,
) {
    let prompt = state.prepared_agent().prompt.clone();
    let runtime = CommandRuntime::new(
        &config.agent.command,
        &config.agent.args,
        &state.settings.model,
        &prompt,
        Arc::clone(registry),
    );

    match runtime.ask(question).await {
        Ok(reply) => {
            let plot = registry.capture();
            state.record_turn(question, &reply, labels, plot);
        }
        Err(err) => {
            display.render_error(&format!("Agent invocation failed: {err:#}"));
            state.record_failed_turn(question, labels);
        }
    }

    // Render the turn just recorded: the question and the reply.
    let messages = state.history.messages();
    for message in &messages[messages.len().saturating_sub(2)..] {
        display.render_message(message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_path(&cli.config)
        .with_context(|| format!("Failed to load config from '{}'", cli.config.display()))?;

    let dataset_path = cli
        .dataset
        .unwrap_or_else(|| config.dataset.path.clone());
    let table = Table::from_csv_path(&dataset_path, config.dataset.name.as_deref())
        .with_context(|| format!("Failed to load dataset '{}'", dataset_path.display()))?;

    let labels = Labels::for_locale(config.ui.locale);
    let display = ChatDisplay::new(labels.clone());
    let registry = Arc::new(PlotRegistry::new());
    let mut state = SessionState::new(table, config.agent_settings(), config.ui.show_code);

    display.print_banner(&state.table);

    // One-shot mode: ask a single question and exit.
    if let Some(question) = cli.question {
        run_turn(&mut state, &config, &registry, &labels, &display, &question).await;
        return Ok(());
    }

    let stdin = std::io::stdin();
    loop {
        eprint!("\n> ");
        let mut line = String::new();
        let bytes_read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;
        if bytes_read == 0 {
            // EOF ends the session
            break;
        }

        match parse_repl_input(&line) {
            ReplInput::Question(question) => {
                run_turn(&mut state, &config, &registry, &labels, &display, &question).await;
            }
            ReplInput::SetPlots(on) => {
                state.settings.include_visualisations = on;
                eprintln!(
                    "Visualisations {}",
                    if on { "enabled" } else { "disabled" }
                );
            }
            ReplInput::SetSimple(on) => {
                state.settings.simple_language = on;
                eprintln!(
                    "Simple language {}",
                    if on { "enabled" } else { "disabled" }
                );
            }
            ReplInput::Reset => {
                state.reset_conversation();
                eprintln!("Conversation cleared.");
            }
            ReplInput::Quit => break,
            ReplInput::Empty => {}
            ReplInput::Unknown(command) => {
                display.render_error(&format!("Unknown command: {command}"));
            }
        }
    }

    Ok(())
}
