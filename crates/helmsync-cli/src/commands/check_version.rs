//! Check-version command - compare the helm client version with a constraint

use console::style;
use helmsync_core::Helm;

use crate::error::{CliError, Result};

pub async fn run(helm: &Helm, constraint: &str) -> Result<()> {
    let version = helm.client_version().await?;

    if helmsync_core::version_satisfies(&version, constraint) {
        println!(
            "{} helm {} satisfies {}",
            style("✓").green().bold(),
            version,
            constraint
        );
        Ok(())
    } else {
        Err(CliError::VersionMismatch {
            version,
            constraint: constraint.to_string(),
        })
    }
}
