//! Chart availability validation
//!
//! Validation never fails: every problem becomes a human-readable message
//! on a reporting channel, so many charts can be checked concurrently and
//! their outcomes collected in whatever order they complete.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;

use crate::chart::{ChartRef, ChartRequest};
use crate::helm::Helm;

/// Marker helm prints when a repository search matches nothing
pub const NO_RESULTS_MARKER: &str = "No results found";

/// `version:` line of `helm inspect chart` output
static VERSION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\nversion:[ \t]*(.*)").expect("valid version regex"));

impl Helm {
    /// Validate one chart and report any problem on `report`
    pub async fn validate_chart(
        &self,
        apps: &str,
        chart: &str,
        version: &str,
        report: &mpsc::UnboundedSender<String>,
    ) {
        if let Some(problem) = self.check_chart(apps, chart, version).await {
            if report.send(problem).is_err() {
                tracing::debug!("Report receiver dropped before chart {} was reported", chart);
            }
        }
    }

    /// Check that a chart exists with the requested version
    ///
    /// Returns a description of the problem, or `None` when the chart is fine.
    pub async fn check_chart(&self, apps: &str, chart: &str, version: &str) -> Option<String> {
        let reference = ChartRef::classify(chart);
        if reference.is_local() {
            self.check_local_chart(apps, chart, &reference, version).await
        } else {
            self.check_remote_chart(apps, chart, version).await
        }
    }

    async fn check_local_chart(
        &self,
        apps: &str,
        chart: &str,
        reference: &ChartRef,
        version: &str,
    ) -> Option<String> {
        let cmd = self.command(
            ["inspect", "chart", chart],
            format!("Validating [ {} ] chart's availability", chart),
        );
        let result = self.execute(&cmd).await;

        if !result.success() {
            let hint = match reference.suggested_repo() {
                Some(repo) => format!(
                    "If this is not a local chart, add the repository [ {} ] to helmRepos.",
                    repo
                ),
                None => "If this is not a local chart, add its repository to helmRepos.".to_string(),
            };
            return Some(format!(
                "Chart [ {} ] for apps [ {} ] can't be found: helm inspect returned \"{}\". {}",
                chart,
                apps,
                result.stderr.trim(),
                hint
            ));
        }

        let found = declared_version(&result.stdout)?;
        if unquote(version) != found {
            return Some(format!(
                "Chart [ {} ] for apps [ {} ] is pinned to version [ {} ] but the chart at that path has version [ {} ].",
                chart, apps, version, found
            ));
        }
        None
    }

    async fn check_remote_chart(&self, apps: &str, chart: &str, version: &str) -> Option<String> {
        let version = if version.is_empty() { "*" } else { version };
        let cmd = self.command(
            ["search", "repo", chart, "--version", version, "-l"],
            format!(
                "Validating [ {} ] chart's version [ {} ] availability",
                chart, version
            ),
        );
        let result = self.execute(&cmd).await;

        if !result.success() || result.stdout.contains(NO_RESULTS_MARKER) {
            return Some(format!(
                "Chart [ {} ] with version [ {} ] for apps [ {} ] was not found. If this is not a local chart, add its repository to helmRepos.",
                chart, version, apps
            ));
        }
        None
    }

    /// Validate many charts concurrently, at most `max_concurrency` at a time
    ///
    /// Returns every reported problem, in completion order.
    pub async fn validate_charts(
        &self,
        requests: Vec<ChartRequest>,
        max_concurrency: usize,
    ) -> Vec<String> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let permits = Arc::new(Semaphore::new(
            max_concurrency.clamp(1, Semaphore::MAX_PERMITS),
        ));
        let mut tasks = JoinSet::new();

        for request in requests {
            let helm = self.clone();
            let tx = tx.clone();
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                helm.validate_chart(&request.apps, &request.chart, &request.version, &tx)
                    .await;
            });
        }

        // The channel closes once every task has dropped its sender
        drop(tx);
        let mut problems = Vec::new();
        while let Some(problem) = rx.recv().await {
            problems.push(problem);
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("Chart validation task failed: {}", e);
            }
        }

        problems
    }
}

/// The unquoted value of the first `version:` line, if any
fn declared_version(inspect_output: &str) -> Option<&str> {
    VERSION_LINE
        .captures(inspect_output)
        .and_then(|caps| caps.get(1))
        .map(|m| unquote(m.as_str()))
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '\'' || c == '"')
}
