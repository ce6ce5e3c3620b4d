//! Line-oriented interactive shell over an [`Agent`].
//!
//! Generic over the reader and writer so the binary can hand it stdin/stdout
//! and tests can hand it byte buffers.

use crate::agent::{Agent, AgentError};
use crate::model::ModelProvider;
use crate::tooling::ToolServer;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info};

const PROMPT: &str = "\nYou: ";
const RULE_WIDTH: usize = 60;

/// How the shell ended when it ended cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplExit {
    /// The user typed `exit` or `quit`.
    UserExit,
    /// Input closed.
    EndOfInput,
}

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("tool server session lost: {reason}")]
    SessionLost { reason: String },
}

pub async fn run<P, T, R, W>(
    agent: &mut Agent<P, T>,
    input: R,
    output: &mut W,
) -> Result<ReplExit, ReplError>
where
    P: ModelProvider,
    T: ToolServer,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_inventory(agent, output).await?;

    let mut input = input;
    let mut buf = Vec::new();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            info!("Input closed; leaving shell");
            return Ok(ReplExit::EndOfInput);
        }
        // Undecodable bytes become U+FFFD; the rest of the line is still a turn.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit_command(line) {
            write_line(output, "Goodbye!").await?;
            return Ok(ReplExit::UserExit);
        }

        debug!(chars = line.chars().count(), "Received user input");
        match agent.run_turn(line).await {
            Ok(outcome) => {
                write_line(output, &format!("\nAgent: {}", outcome.response)).await?;
            }
            Err(AgentError::SessionLost { reason }) => {
                error!(%reason, "Tool server session lost");
                let message = AgentError::SessionLost {
                    reason: reason.clone(),
                }
                .user_message();
                write_line(output, &format!("Error: {message}")).await?;
                return Err(ReplError::SessionLost { reason });
            }
            Err(err) => {
                error!(error = %err, "Turn failed");
                write_line(output, &format!("Error: {}", err.user_message())).await?;
            }
        }
    }
}

fn is_exit_command(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

async fn write_inventory<P, T, W>(agent: &Agent<P, T>, output: &mut W) -> Result<(), ReplError>
where
    P: ModelProvider,
    T: ToolServer,
    W: AsyncWrite + Unpin,
{
    let names = agent
        .tools()
        .iter()
        .map(|tool| tool.name.as_str())
        .collect::<Vec<_>>();
    let listing = if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    };
    write_line(output, &format!("Available Tools: {listing}")).await?;
    write_line(output, &"-".repeat(RULE_WIDTH)).await
}

async fn write_line<W>(output: &mut W, text: &str) -> Result<(), ReplError>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
