//! The helm client facade
//!
//! [`Helm`] pairs the helm program name with a [`CommandRunner`]. The
//! version gate, plugin probe, chart validation and chart resolution are
//! implemented as methods on it in their own modules.

use std::fmt;
use std::sync::Arc;

use crate::command::{CommandResult, CommandRunner, HelmCommand, ProcessRunner};

/// Default helm executable, resolved through `PATH`
pub const DEFAULT_HELM_BINARY: &str = "helm";

/// Cheap-to-clone handle for invoking helm
#[derive(Clone)]
pub struct Helm {
    program: String,
    runner: Arc<dyn CommandRunner>,
}

impl Helm {
    /// Create a client that spawns `program` as a child process
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, Arc::new(ProcessRunner))
    }

    /// Create a client backed by a custom runner
    pub fn with_runner(program: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// The helm program this client invokes
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Prepare a helm invocation
    pub fn command<I, S>(&self, args: I, description: impl Into<String>) -> HelmCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HelmCommand::new(self.program.clone(), args, description)
    }

    /// Run a prepared invocation to completion
    pub async fn execute(&self, command: &HelmCommand) -> CommandResult {
        self.runner.run(command).await
    }
}

impl Default for Helm {
    fn default() -> Self {
        Self::new(DEFAULT_HELM_BINARY)
    }
}

impl fmt::Debug for Helm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Helm")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}
