//! External command execution
//!
//! Every interaction with helm goes through a [`CommandRunner`]. The runner
//! never interprets exit codes: a non-zero exit is data for the caller, not
//! an error at this layer.

use async_trait::async_trait;
use std::fmt;

/// Flags whose following argument must never be logged
const SECRET_FLAGS: &[&str] = &["--password"];

/// A prepared invocation of an external program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmCommand {
    /// Program to execute
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Human-readable purpose, used for progress and log messages only
    pub description: String,
}

impl HelmCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }

    /// Arguments with secret values replaced, safe for logs
    pub fn redacted_args(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.args.len());
        let mut hide_next = false;
        for arg in &self.args {
            if hide_next {
                out.push("***");
                hide_next = false;
                continue;
            }
            hide_next = SECRET_FLAGS.contains(&arg.as_str());
            out.push(arg.as_str());
        }
        out
    }
}

impl fmt::Display for HelmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.redacted_args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Outcome of one external invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// A successful run with the given standard output
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and standard error
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes external commands
///
/// Implementations must be Send + Sync so that many chart validations can
/// share one runner across tasks.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion and capture its output
    async fn run(&self, command: &HelmCommand) -> CommandResult;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &HelmCommand) -> CommandResult {
        tracing::debug!(command = %command, "{}", command.description);

        let output = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .stdin(std::process::Stdio::null())
            .output()
            .await;

        match output {
            Ok(out) => {
                // Killed by a signal: no exit code
                let exit_code = out.status.code().unwrap_or(-1);
                let result = CommandResult {
                    exit_code,
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                };
                tracing::debug!(exit_code, "{} finished", command.program);
                result
            }
            Err(e) => {
                tracing::debug!("Failed to spawn {}: {}", command.program, e);
                CommandResult::failure(-1, format!("failed to run {}: {}", command.program, e))
            }
        }
    }
}
