//! Command executor trait

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExecError;
use crate::result::{CommandLine, CommandResult};

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn run(&self, cmd: &CommandLine) -> Result<CommandResult, ExecError>;

    async fn run_with_timeout(
        &self,
        cmd: &CommandLine,
        timeout: Duration,
    ) -> Result<CommandResult, ExecError>;

    fn executor_type(&self) -> &'static str;

    /// Run a command and return its stdout, failing on a non-zero exit status
    async fn stdout_of(&self, cmd: &CommandLine, timeout: Duration) -> Result<String, ExecError> {
        let result = self.run_with_timeout(cmd, timeout).await?;
        if !result.success() {
            return Err(ExecError::CommandFailed {
                program: cmd.program().to_string(),
                status: result.status,
                stderr: result.stderr.trim_end().to_string(),
            });
        }
        Ok(result.stdout)
    }
}
