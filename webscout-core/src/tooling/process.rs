use super::error::ToolInvokeError;
use crate::config::ServerConfig;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info, warn};

/// How long a child gets to exit on its own after stdin closes.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Owns the tool-server child process.
///
/// The child is killed when this value is dropped, so every exit path
/// releases it; [`ToolServerProcess::shutdown`] additionally reaps it.
#[derive(Debug)]
pub struct ToolServerProcess {
    name: String,
    child: Child,
}

impl ToolServerProcess {
    /// Launches the server with piped stdio; stderr stays attached to ours.
    pub fn spawn(
        config: &ServerConfig,
    ) -> Result<(Self, ChildStdin, ChildStdout), ToolInvokeError> {
        let mut command = Command::new(&config.command);
        command
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = &config.workdir {
            command.current_dir(dir);
        }
        for (key, value) in &config.env {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|source| ToolInvokeError::Spawn {
            server: config.name.clone(),
            source,
        })?;

        let transport_error = |message: &str| ToolInvokeError::Transport {
            server: config.name.clone(),
            message: message.to_string(),
        };
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| transport_error("failed to capture server stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| transport_error("failed to capture server stdout"))?;

        info!(
            server = %config.name,
            command = %config.command.display(),
            pid = child.id(),
            "Spawned MCP tool server"
        );

        Ok((
            Self {
                name: config.name.clone(),
                child,
            },
            stdin,
            stdout,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Exit status if the child has already terminated.
    pub fn exit_status(&mut self) -> Option<ExitStatus> {
        match self.child.try_wait() {
            Ok(status) => status,
            Err(err) => {
                debug!(server = %self.name, %err, "Failed to poll MCP server status");
                None
            }
        }
    }

    /// Waits briefly for a voluntary exit, then kills and reaps the child.
    ///
    /// Callers should close the child's stdin first so a well-behaved server
    /// can exit on its own.
    pub async fn shutdown(mut self) {
        match tokio::time::timeout(SHUTDOWN_GRACE, self.child.wait()).await {
            Ok(Ok(status)) => {
                debug!(server = %self.name, %status, "MCP server exited");
                return;
            }
            Ok(Err(err)) => {
                debug!(server = %self.name, %err, "Failed to wait for MCP server");
            }
            Err(_) => {
                debug!(server = %self.name, "MCP server still running after grace period");
            }
        }

        if let Err(err) = self.child.kill().await {
            warn!(
                server = %self.name,
                %err,
                "failed to kill MCP server process (may have already exited)"
            );
        } else {
            info!(server = %self.name, "Terminated MCP tool server");
        }
    }
}
