//! Show command - display chart metadata as resolved by helm

use console::style;
use helmsync_core::Helm;

use crate::error::Result;

pub async fn run(helm: &Helm, chart: &str, version: &str, json: bool) -> Result<()> {
    let info = helm.chart_info(chart, version).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", style(&info.name).cyan().bold());
    println!("{}", style("=".repeat(info.name.len())).dim());
    println!();

    println!("{}: {}", style("Version").bold(), info.version);

    if let Some(app_version) = &info.app_version {
        println!("{}: {}", style("App Version").bold(), app_version);
    }

    if let Some(desc) = &info.description {
        println!("{}: {}", style("Description").bold(), desc);
    }

    if let Some(chart_type) = &info.chart_type {
        println!("{}: {}", style("Type").bold(), chart_type);
    }

    if !info.extra.is_empty() {
        println!();
        print!("{}", serde_yaml::to_string(&info.extra)?);
    }

    Ok(())
}
