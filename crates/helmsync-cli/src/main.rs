//! helmsync CLI - reconcile helm repositories and validate charts

use clap::{Parser, Subcommand};
use helmsync_core::{DEFAULT_STATE_FILE, DesiredState, Helm};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

use error::{CliError, Result};

#[derive(Parser)]
#[command(name = "helmsync")]
#[command(author = "helmsync Contributors")]
#[command(version)]
#[command(about = "Keep helm repositories in sync and check that charts resolve", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Desired state file
    #[arg(short = 'f', long = "file", global = true, default_value = DEFAULT_STATE_FILE)]
    file: PathBuf,

    /// helm executable (overrides settings.helmBinary)
    #[arg(long, global = true, env = "HELMSYNC_HELM_BIN")]
    helm_bin: Option<String>,

    /// Maximum concurrent chart validations (overrides settings.maxConcurrency)
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the repositories declared in helmRepos
    Repos,

    /// Check that the chart of every enabled app resolves
    Validate {
        /// Output validation results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show chart metadata as resolved by helm
    #[command(disable_version_flag = true)]
    Show {
        /// Chart reference (repo/chart or local path)
        chart: String,

        /// Chart version constraint
        #[arg(long, default_value = "")]
        version: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update the dependencies of a local chart
    Deps {
        /// Chart directory
        path: PathBuf,
    },

    /// Check the helm client version against a semver constraint
    CheckVersion {
        /// Constraint, e.g. ">=3.3.2"
        constraint: String,
    },
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "helmsync=debug,helmsync_core=debug"
    } else {
        "helmsync=info,helmsync_core=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let state_required = matches!(cli.command, Commands::Repos | Commands::Validate { .. });
    let state = load_state(&cli.file, state_required)?;

    let helm_bin = cli
        .helm_bin
        .unwrap_or_else(|| state.settings.helm_binary.clone());
    let concurrency = cli.concurrency.unwrap_or(state.settings.max_concurrency);
    if concurrency == 0 {
        return Err(CliError::config_with_help(
            "--concurrency must be at least 1",
            "omit the flag to use settings.maxConcurrency",
        ));
    }

    tracing::debug!("Using helm binary {} with concurrency {}", helm_bin, concurrency);
    let helm = Helm::new(helm_bin);

    match cli.command {
        Commands::Repos => commands::repos::run(&helm, &state).await,

        Commands::Validate { json } => {
            commands::validate::run(&helm, &state, concurrency, json).await
        }

        Commands::Show {
            chart,
            version,
            json,
        } => commands::show::run(&helm, &chart, &version, json).await,

        Commands::Deps { path } => commands::deps::run(&helm, &path).await,

        Commands::CheckVersion { constraint } => {
            commands::check_version::run(&helm, &constraint).await
        }
    }
}

/// Load the desired state; a missing optional file yields the defaults
fn load_state(path: &Path, required: bool) -> Result<DesiredState> {
    if path.exists() {
        return Ok(DesiredState::load_from(path)?);
    }

    if required {
        return Err(CliError::config_with_help(
            format!("{} not found", path.display()),
            "create it or point to one with --file <path>",
        ));
    }

    Ok(DesiredState::default())
}
