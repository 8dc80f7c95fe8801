//! Agent runtime interface and subprocess implementation
//!
//! `AgentRuntime` is the seam between the chat loop and whatever process
//! actually runs analysis code. The built-in `CommandRuntime` shells out to
//! a configured agent command and reads its trace stream; swapping in a
//! different backend only requires implementing the trait.

use std::process::Stdio;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

use crate::agent::stream::{TraceAccumulator, TraceEvent};
use crate::plot::PlotRegistry;
use crate::transcript::{format_events, format_transcript, Labels};

/// The transcript half of an agent reply.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentTranscript {
    /// Human-readable verbose log, recovered by the text shim
    Raw(String),
    /// Structured trace events, the preferred path
    Events(Vec<TraceEvent>),
}

/// One turn's worth of agent output.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    /// Execution trace for the turn
    pub transcript: AgentTranscript,
    /// The agent's final natural-language answer
    pub answer: String,
}

impl AgentReply {
    /// Render the process portion of the reply (code executed, results).
    ///
    /// Returns an empty string when the trace holds nothing beyond the
    /// answer itself.
    #[must_use]
    pub fn formatted_output(&self, labels: &Labels) -> String {
        match &self.transcript {
            AgentTranscript::Raw(raw) => format_transcript(raw, &self.answer, labels),
            AgentTranscript::Events(events) => format_events(events, &self.answer, labels),
        }
    }
}

/// Interface to the process that answers questions about the dataset.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Ask one question and collect the reply for the turn.
    async fn ask(&self, question: &str) -> Result<AgentReply>;
}

/// Runtime that shells out to a configured analysis-agent command.
///
/// The command receives the model, system prompt, and question as flags and
/// is expected to emit trace events as newline-delimited JSON on stdout
/// (see [`crate::agent::stream`]). Plain-text stdout is tolerated and
/// treated as a raw verbose log. Figures announced via plot events are read
/// from disk and registered with the [`PlotRegistry`].
pub struct CommandRuntime {
    program: String,
    args: Vec<String>,
    model: String,
    prompt: String,
    registry: Arc<PlotRegistry>,
}

impl CommandRuntime {
    /// Create a runtime for the given agent command.
    #[must_use]
    pub fn new(
        program: &str,
        args: &[String],
        model: &str,
        prompt: &str,
        registry: Arc<PlotRegistry>,
    ) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
            model: model.to_string(),
            prompt: prompt.to_string(),
            registry,
        }
    }

    /// Build the command for one question.
    fn build_command(&self, question: &str) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.program);
        for arg in &self.args {
            cmd.arg(arg);
        }
        cmd.arg("--model").arg(&self.model);
        cmd.arg("--prompt").arg(&self.prompt);
        cmd.arg("--question").arg(question);
        cmd
    }
}

#[async_trait]
impl AgentRuntime for CommandRuntime {
    async fn ask(&self, question: &str) -> Result<AgentReply> {
        let cmd = self.build_command(question);
        let accumulator = run_agent_command(cmd).await?;

        // Export any figures the sandbox rendered before the accumulator is
        // consumed. A path that no longer exists is skipped, not fatal.
        for path in &accumulator.plots {
            if let Ok(bytes) = std::fs::read(path) {
                self.registry.register(bytes);
            }
        }

        let answer = accumulator.answer.clone().unwrap_or_default();
        let transcript = if accumulator.has_events() {
            AgentTranscript::Events(accumulator.events)
        } else {
            AgentTranscript::Raw(accumulator.raw_log())
        };

        Ok(AgentReply { transcript, answer })
    }
}

/// Run the agent command to completion, feeding each stdout line to a
/// `TraceAccumulator`.
async fn run_agent_command(cmd: std::process::Command) -> Result<TraceAccumulator> {
    let mut tokio_cmd = TokioCommand::from(cmd);
    tokio_cmd.stdin(Stdio::null());
    tokio_cmd.stdout(Stdio::piped());
    tokio_cmd.stderr(Stdio::null());

    let mut child = tokio_cmd.spawn().context("Failed to spawn agent process")?;

    let stdout = child.stdout.take().context("Failed to capture agent stdout")?;
    let reader = BufReader::new(stdout);
    let mut lines = reader.lines();
    let mut accumulator = TraceAccumulator::new();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read agent output")?
    {
        accumulator.process_line(&line);
    }

    let status = child.wait().await.context("Failed waiting for agent process")?;
    if !status.success() {
        bail!("Agent process exited with status {status}");
    }

    Ok(accumulator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as IoWrite;
    use tempfile::NamedTempFile;

    fn sh(script: &str) -> std::process::Command {
        let mut cmd = std::process::Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    // --- run_agent_command tests ---

    #[tokio::test]
    async fn test_run_collects_structured_events() {
        let script = r#"
            echo '{"type":"tool_use","tool":"python_repl_ast","input":{"query":"df.shape[0]"}}'
            echo '{"type":"observation","content":"891"}'
            echo '{"type":"result","answer":"There are 891 rows."}'
        "#;
        let acc = run_agent_command(sh(script)).await.unwrap();

        assert_eq!(acc.events.len(), 3);
        assert_eq!(acc.answer.as_deref(), Some("There are 891 rows."));
        assert!(acc.raw_lines.is_empty());
    }

    #[tokio::test]
    async fn test_run_keeps_plain_text_as_raw_log() {
        let script = "echo 'Invoking: `python_repl_ast` with `{}`'; echo '891'";
        let acc = run_agent_command(sh(script)).await.unwrap();

        assert!(!acc.has_events());
        assert_eq!(acc.raw_log(), "Invoking: `python_repl_ast` with `{}`\n891");
    }

    #[tokio::test]
    async fn test_run_fails_on_nonzero_exit() {
        let result = run_agent_command(sh("exit 3")).await;
        assert!(result.is_err());
    }

    // --- CommandRuntime tests ---

    #[test]
    fn test_build_command_includes_model_prompt_and_question() {
        let runtime = CommandRuntime::new(
            "analysis-agent",
            &["--structured".to_string()],
            "gpt-4.1-nano",
            "You are a helpful data analysis assistant.",
            Arc::new(PlotRegistry::new()),
        );
        let cmd = runtime.build_command("How many rows are there?");

        assert_eq!(cmd.get_program(), "analysis-agent");
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            args,
            vec![
                "--structured",
                "--model",
                "gpt-4.1-nano",
                "--prompt",
                "You are a helpful data analysis assistant.",
                "--question",
                "How many rows are there?",
            ]
        );
    }

    // `sh -c <script> <extra args>` ignores the extra args the runtime
    // appends, which makes it a convenient fake agent.
    #[tokio::test]
    async fn test_ask_returns_structured_reply() {
        let script = r#"
            echo '{"type":"tool_use","tool":"python_repl_ast","input":{"query":"df.shape[0]"}}'
            echo '{"type":"observation","content":"891"}'
            echo '{"type":"result","answer":"There are 891 rows."}'
        "#;
        let runtime = CommandRuntime::new(
            "sh",
            &["-c".to_string(), script.to_string()],
            "test-model",
            "prompt",
            Arc::new(PlotRegistry::new()),
        );

        let reply = runtime.ask("How many rows?").await.unwrap();
        assert_eq!(reply.answer, "There are 891 rows.");
        assert!(matches!(reply.transcript, AgentTranscript::Events(ref e) if e.len() == 3));
    }

    #[tokio::test]
    async fn test_ask_degrades_to_raw_transcript() {
        let script = "echo 'verbose line one'; echo 'verbose line two'";
        let runtime = CommandRuntime::new(
            "sh",
            &["-c".to_string(), script.to_string()],
            "test-model",
            "prompt",
            Arc::new(PlotRegistry::new()),
        );

        let reply = runtime.ask("question").await.unwrap();
        assert_eq!(reply.answer, "");
        assert_eq!(
            reply.transcript,
            AgentTranscript::Raw("verbose line one\nverbose line two".to_string())
        );
    }

    #[tokio::test]
    async fn test_ask_registers_announced_plots() {
        let mut figure = NamedTempFile::new().unwrap();
        figure.write_all(b"png-bytes").unwrap();
        let path = figure.path().to_string_lossy().to_string();

        let script = format!(
            r#"echo '{{"type":"plot","path":"{path}"}}'; echo '{{"type":"result","answer":"Here is the plot."}}'"#
        );
        let registry = Arc::new(PlotRegistry::new());
        let runtime = CommandRuntime::new(
            "sh",
            &["-c".to_string(), script],
            "test-model",
            "prompt",
            Arc::clone(&registry),
        );

        let reply = runtime.ask("plot something").await.unwrap();
        assert_eq!(reply.answer, "Here is the plot.");
        assert_eq!(registry.capture(), Some(b"png-bytes".to_vec()));
    }

    #[tokio::test]
    async fn test_ask_skips_missing_plot_files() {
        let script = r#"echo '{"type":"plot","path":"/nonexistent/figure.png"}'"#;
        let registry = Arc::new(PlotRegistry::new());
        let runtime = CommandRuntime::new(
            "sh",
            &["-c".to_string(), script.to_string()],
            "test-model",
            "prompt",
            Arc::clone(&registry),
        );

        let reply = runtime.ask("plot something").await.unwrap();
        assert!(registry.capture().is_none());
        assert!(matches!(reply.transcript, AgentTranscript::Events(_)));
    }

    // --- AgentReply::formatted_output tests ---

    #[test]
    fn test_formatted_output_raw_path() {
        let reply = AgentReply {
            transcript: AgentTranscript::Raw(
                "Invoking: `python_repl_ast` with `{'query': 'df.shape[0]'}`\n891".to_string(),
            ),
            answer: "There are 891 rows.".to_string(),
        };
        let output = reply.formatted_output(&Labels::default());
        assert!(output.contains("df.shape[0]"));
        assert!(output.contains("891"));
    }

    #[test]
    fn test_formatted_output_event_path() {
        let reply = AgentReply {
            transcript: AgentTranscript::Events(vec![TraceEvent::ToolInvocation {
                tool_name: "python_repl_ast".to_string(),
                input: serde_json::json!({"query": "df.head()"}),
            }]),
            answer: "See above.".to_string(),
        };
        let output = reply.formatted_output(&Labels::default());
        assert_eq!(output, "**Code Executed:**\n```python\ndf.head()\n```");
    }
}
