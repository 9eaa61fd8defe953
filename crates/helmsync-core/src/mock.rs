//! Scripted command runner for testing
//!
//! Answers invocations from a table of argument prefixes and records every
//! command it receives, so tests can run the whole core without helm.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::command::{CommandResult, CommandRunner, HelmCommand};

/// In-memory runner returning canned results
#[derive(Clone)]
pub struct MockRunner {
    /// Argument prefix -> result; the longest matching prefix wins, and
    /// among equal prefixes the most recently registered one
    responses: Arc<RwLock<Vec<(Vec<String>, CommandResult)>>>,
    /// Every command received, in order
    invocations: Arc<RwLock<Vec<HelmCommand>>>,
}

impl MockRunner {
    /// Create a runner that fails every invocation until scripted
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(Vec::new())),
            invocations: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Answer invocations whose arguments start with `prefix`
    pub fn on<I, S>(self, prefix: I, result: CommandResult) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefix = prefix.into_iter().map(Into::into).collect();
        self.responses.write().unwrap().push((prefix, result));
        self
    }

    /// All commands received so far
    pub fn invocations(&self) -> Vec<HelmCommand> {
        self.invocations.read().unwrap().clone()
    }

    /// Number of commands whose arguments start with `prefix`
    pub fn count(&self, prefix: &[&str]) -> usize {
        self.invocations
            .read()
            .unwrap()
            .iter()
            .filter(|cmd| starts_with(&cmd.args, prefix))
            .count()
    }

    fn respond(&self, args: &[String]) -> CommandResult {
        let responses = self.responses.read().unwrap();
        responses
            .iter()
            .filter(|(prefix, _)| starts_with(args, prefix.as_slice()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| {
                CommandResult::failure(1, format!("unexpected invocation: {}", args.join(" ")))
            })
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn starts_with<S: AsRef<str>>(args: &[String], prefix: &[S]) -> bool {
    args.len() >= prefix.len()
        && args
            .iter()
            .zip(prefix)
            .all(|(arg, expected)| arg == expected.as_ref())
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, command: &HelmCommand) -> CommandResult {
        self.invocations.write().unwrap().push(command.clone());
        self.respond(&command.args)
    }
}
