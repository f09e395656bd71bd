//! Error types for hcloud-inventory-exec

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during command execution
#[derive(Error, Debug, Clone)]
pub enum ExecError {
    /// Command exited with a non-zero status
    #[error("command `{program}` failed with status {status}: {stderr}")]
    CommandFailed {
        /// Program that was run
        program: String,
        /// Exit status code
        status: i32,
        /// Stderr output
        stderr: String,
    },

    /// Command timed out
    #[error("command timed out after {timeout:?}")]
    Timeout {
        /// Timeout duration that was exceeded
        timeout: Duration,
    },

    /// Program does not exist or is not on `PATH`
    #[error("program not found: {0}")]
    ProgramNotFound(String),

    /// Process spawn error
    #[error("failed to spawn process: {0}")]
    SpawnError(String),

    /// I/O error during execution
    #[error("I/O error: {0}")]
    IoError(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}
