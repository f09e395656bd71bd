//! Command and result types

use std::time::Duration;

use crate::error::ExecError;

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit status code (0 for success)
    pub status: i32,
    /// stdout output
    pub stdout: String,
    /// stderr output
    pub stderr: String,
    /// Time taken to execute
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded (exit code 0)
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// A program and its arguments, run without a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Create a command line from a program and arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a command string on whitespace
    ///
    /// No quoting is interpreted: `pass show "my token"` yields the arguments
    /// `show`, `"my` and `token"`.
    ///
    /// # Errors
    /// Returns an error if the string contains no program.
    pub fn parse(line: &str) -> Result<Self, ExecError> {
        let mut parts = line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ExecError::ConfigError("empty command".to_string()))?;
        Ok(Self::new(program, parts))
    }

    /// Program name or path
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_whitespace() {
        let cmd = CommandLine::parse("  pass   show\thcloud/token ").unwrap();
        assert_eq!(cmd.program(), "pass");
        assert_eq!(cmd.args(), ["show", "hcloud/token"]);
        assert_eq!(cmd.to_string(), "pass show hcloud/token");
    }

    #[test]
    fn test_parse_without_args() {
        let cmd = CommandLine::parse("get-token").unwrap();
        assert_eq!(cmd.program(), "get-token");
        assert!(cmd.args().is_empty());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            CommandLine::parse("   "),
            Err(ExecError::ConfigError(_))
        ));
    }
}
