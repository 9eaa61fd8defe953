//! Display formatting for CLI output
//!
//! Provides structured display for:
//! - Chart validation problems with a summary line
//! - Repository reconciliation results

use console::style;
use helmsync_core::ReconcileReport;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Collected chart validation results
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub checked: usize,
    pub problems: Vec<String>,
}

impl ValidationReport {
    /// Build a report, sorting problems for stable output
    pub fn new(checked: usize, mut problems: Vec<String>) -> Self {
        problems.sort();
        Self {
            valid: problems.is_empty(),
            checked,
            problems,
        }
    }

    /// Print every problem
    pub fn display(&self) {
        for problem in &self.problems {
            println!("  {} {}", style("✗").red(), problem);
        }
    }

    /// Print summary line
    pub fn print_summary(&self) {
        if self.valid {
            println!(
                "{} Validation passed! {} chart(s) checked",
                style("✓").green().bold(),
                self.checked
            );
        } else {
            println!(
                "{} Validation failed: {} problem(s) in {} chart(s)",
                style("✗").red().bold(),
                self.problems.len(),
                self.checked
            );
        }
    }
}

/// Print the outcome of a repository reconciliation
pub fn print_reconcile_report(report: &ReconcileReport) {
    for name in &report.added {
        println!("  {} {} added", style("+").green(), name);
    }
    for name in &report.skipped {
        println!("  {} {} up to date", style("=").dim(), name);
    }

    if report.refreshed {
        println!(
            "{} {} repository(ies) added, {} unchanged, indexes refreshed",
            style("✓").green().bold(),
            report.added.len(),
            report.skipped.len()
        );
    } else {
        println!("{} No repositories declared", style("⚠").yellow());
    }
}

/// Spinner shown while helm runs in the background
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        bar.set_style(template);
    }
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
