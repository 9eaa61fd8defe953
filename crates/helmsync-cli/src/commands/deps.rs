//! Deps command - update the dependencies of a local chart

use console::style;
use helmsync_core::Helm;
use std::path::Path;

use crate::error::{CliError, Result};

pub async fn run(helm: &Helm, chart_path: &Path) -> Result<()> {
    if !chart_path.is_dir() {
        return Err(CliError::Chart {
            message: format!("{} is not a chart directory", chart_path.display()),
            help: None,
        });
    }

    let path = chart_path.to_string_lossy();
    helm.update_dependencies(&path).await?;

    println!(
        "{} Dependencies of {} are up to date",
        style("✓").green().bold(),
        path
    );
    Ok(())
}
