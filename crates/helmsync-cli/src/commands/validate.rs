//! Validate command - check that every app's chart resolves

use console::style;
use helmsync_core::{DesiredState, Helm};

use crate::display::{self, ValidationReport};
use crate::error::{CliError, Result};

pub async fn run(helm: &Helm, state: &DesiredState, concurrency: usize, json: bool) -> Result<()> {
    let requests = state.chart_requests();
    let checked = requests.len();

    let spinner = if json {
        None
    } else {
        println!(
            "{} Validating {} chart(s) for {} app(s)",
            style("→").blue(),
            checked,
            state.apps.len()
        );
        Some(display::spinner("Querying helm..."))
    };

    let problems = helm.validate_charts(requests, concurrency).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = ValidationReport::new(checked, problems);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.display();
        report.print_summary();
    }

    if report.valid {
        Ok(())
    } else {
        Err(CliError::Validation {
            problems: report.problems.len(),
        })
    }
}
