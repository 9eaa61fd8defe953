//! Chart metadata resolution and local chart dependencies

use crate::chart::{ChartInfo, ChartRef};
use crate::error::{RepoError, Result};
use crate::helm::Helm;

impl Helm {
    /// Fetch the metadata of the chart matching `version`
    ///
    /// A missing chart is [`RepoError::ChartNotFound`]. Output that helm
    /// reported as successful but that does not decode is
    /// [`RepoError::MalformedOutput`].
    pub async fn chart_info(&self, chart: &str, version: &str) -> Result<ChartInfo> {
        if ChartRef::classify(chart).is_local() {
            tracing::info!("Chart [ {} ] with version [ {} ] was found locally.", chart, version);
        }

        let cmd = self.command(
            ["show", "chart", chart, "--version", version],
            format!("Getting latest non-local chart's version {}-{}", chart, version),
        );
        let result = self.execute(&cmd).await;
        if !result.success() {
            tracing::debug!("helm show chart failed: {}", result.stderr.trim());
            return Err(RepoError::ChartNotFound {
                chart: chart.to_string(),
                version: version.to_string(),
            });
        }

        serde_yaml::from_str(&result.stdout).map_err(|e| RepoError::MalformedOutput {
            command: cmd.to_string(),
            message: e.to_string(),
        })
    }

    /// Run `helm dependency update` for a local chart
    pub async fn update_dependencies(&self, chart_path: &str) -> Result<()> {
        let cmd = self.command(
            ["dependency", "update", chart_path],
            format!("Updating dependency for local chart [ {} ]", chart_path),
        );
        let result = self.execute(&cmd).await;
        if !result.success() {
            return Err(RepoError::DependencyUpdateFailed {
                chart: chart_path.to_string(),
                message: result.stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}
