//! Local command execution using `tokio::process`

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, error, instrument};

use crate::error::ExecError;
use crate::result::{CommandLine, CommandResult};
use crate::traits::CommandExecutor;

/// Local command executor
///
/// Executes commands on the local machine using `tokio::process::Command`.
#[derive(Debug, Clone)]
pub struct LocalExecutor;

impl LocalExecutor {
    /// Create a new local executor
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Internal method to execute command
    #[instrument(skip(self, cmd), fields(program = %cmd.program()), level = "debug")]
    async fn execute(&self, cmd: &CommandLine) -> Result<CommandResult, ExecError> {
        let start = Instant::now();

        // stdout may hold a secret and is never logged
        let child = Command::new(cmd.program())
            .args(cmd.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ExecError::ProgramNotFound(cmd.program().to_string()),
                _ => ExecError::SpawnError(e.to_string()),
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ExecError::IoError(e.to_string()))?;

        let duration = start.elapsed();

        let status = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        debug!(status = status, duration = ?duration, "command completed");

        if !output.status.success() {
            error!(status = status, stderr = %stderr, "command failed");
        }

        Ok(CommandResult {
            status,
            stdout,
            stderr,
            duration,
        })
    }
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for LocalExecutor {
    async fn run(&self, cmd: &CommandLine) -> Result<CommandResult, ExecError> {
        self.execute(cmd).await
    }

    async fn run_with_timeout(
        &self,
        cmd: &CommandLine,
        timeout_duration: Duration,
    ) -> Result<CommandResult, ExecError> {
        let start = Instant::now();

        match timeout(timeout_duration, self.execute(cmd)).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    program = %cmd.program(),
                    timeout = ?timeout_duration,
                    elapsed = ?start.elapsed(),
                    "command timed out"
                );
                Err(ExecError::Timeout {
                    timeout: timeout_duration,
                })
            }
        }
    }

    fn executor_type(&self) -> &'static str {
        "local"
    }
}
