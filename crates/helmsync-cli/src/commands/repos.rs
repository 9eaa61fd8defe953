//! Repos command - register the repositories declared in the desired state

use console::style;
use helmsync_core::{DesiredState, Helm, RepoReconciler};

use crate::display;
use crate::error::Result;

pub async fn run(helm: &Helm, state: &DesiredState) -> Result<()> {
    println!(
        "{} Reconciling {} helm repository(ies)",
        style("→").blue(),
        state.helm_repos.len()
    );

    let report = RepoReconciler::new(helm.clone())
        .reconcile(&state.helm_repos)
        .await?;

    display::print_reconcile_report(&report);
    Ok(())
}
