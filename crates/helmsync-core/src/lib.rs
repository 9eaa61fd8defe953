//! helmsync core
//!
//! Keeps helm's registered chart repositories consistent with a desired
//! state and checks that requested charts resolve before a deployment.
//! The helm CLI is the only source of truth; every interaction goes
//! through a [`CommandRunner`].
//!
//! - **Version gate**: enable optional flags based on the helm client version
//! - **Chart validation**: concurrent existence and version checks
//! - **Chart info**: decode `helm show chart` metadata
//! - **Plugin probe**: detect installed helm plugins
//! - **Repository reconciliation**: idempotent `helm repo add` + one refresh
//!
//! ## Example
//!
//! ```rust,no_run
//! use helmsync_core::{DesiredState, Helm, RepoReconciler};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = DesiredState::load_from(Path::new("helmsync.yaml"))?;
//! let helm = Helm::new(state.settings.helm_binary.clone());
//!
//! // Register repositories
//! let report = RepoReconciler::new(helm.clone())
//!     .reconcile(&state.helm_repos)
//!     .await?;
//! println!("added: {:?}", report.added);
//!
//! // Check every chart
//! let problems = helm
//!     .validate_charts(state.chart_requests(), state.settings.max_concurrency)
//!     .await;
//! for problem in problems {
//!     eprintln!("{}", problem);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Security Notes
//!
//! - Credentials embedded in repository URLs are passed to helm as separate
//!   arguments, never inside the URL
//! - Logged command lines mask `--password` values

pub mod error;
pub mod command;
pub mod helm;
pub mod version;
pub mod plugin;
pub mod chart;
pub mod validate;
pub mod resolve;
pub mod credentials;
pub mod reconcile;
pub mod config;
pub mod mock;

// Re-exports for convenience
pub use error::{RepoError, Result};
pub use command::{CommandResult, CommandRunner, HelmCommand, ProcessRunner};
pub use helm::{DEFAULT_HELM_BINARY, Helm};
pub use version::{extract_version, parse_version, version_satisfies};
pub use chart::{ChartInfo, ChartRef, ChartRequest};
pub use validate::NO_RESULTS_MARKER;
pub use credentials::{
    BasicAuth, CloudAuthenticator, DesiredRepository, GcsAuthenticator, NoopAuthenticator,
};
pub use reconcile::{
    FORCE_UPDATE_CONSTRAINT, ReconcileReport, RepoReconciler, RepositoryRecord, parse_repo_list,
};
pub use config::{AppSpec, DEFAULT_STATE_FILE, DesiredState, Settings};
pub use mock::MockRunner;
