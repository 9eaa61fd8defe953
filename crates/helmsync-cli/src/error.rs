//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use helmsync_core::RepoError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// One or more charts failed validation
    #[error("Validation failed: {problems} chart problem(s) found")]
    #[diagnostic(
        code(helmsync::cli::validation),
        help("add the missing repositories to helmRepos or fix the chart versions")
    )]
    Validation { problems: usize },

    /// Invalid desired state or arguments
    #[error("Invalid desired state: {message}")]
    #[diagnostic(code(helmsync::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Chart lookup or dependency update failed
    #[error("Chart error: {message}")]
    #[diagnostic(code(helmsync::cli::chart))]
    Chart {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Repository reconciliation failed
    #[error("Repository error: {message}")]
    #[diagnostic(code(helmsync::cli::repository))]
    Repository {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(helmsync::cli::io))]
    Io { message: String },

    /// helm client is older or newer than required
    #[error("helm {version} does not satisfy {constraint}")]
    #[diagnostic(code(helmsync::cli::version))]
    VersionMismatch { version: String, constraint: String },

    /// helm itself is unusable or misbehaving
    #[error("{message}")]
    #[diagnostic(
        code(helmsync::cli::helm),
        help("check that helm is installed and on PATH, or pass --helm-bin")
    )]
    Helm { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::Config { .. } => exit_codes::USAGE_ERROR,
            CliError::Chart { .. } => exit_codes::CHART_ERROR,
            CliError::Repository { .. } => exit_codes::REPOSITORY_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::VersionMismatch { .. } => exit_codes::ERROR,
            CliError::Helm { .. } => exit_codes::ERROR,
        }
    }

    /// Create a configuration error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<RepoError> for CliError {
    fn from(err: RepoError) -> Self {
        let message = err.to_string();
        match err {
            RepoError::InvalidRepositoryUrl { .. }
            | RepoError::IncompleteBasicAuth { .. }
            | RepoError::InvalidConfig { .. }
            | RepoError::Serialization(_) => CliError::Config {
                message,
                help: None,
            },
            RepoError::ChartNotFound { .. } => CliError::Chart {
                message,
                help: Some("run `helmsync repos` to register the chart's repository".to_string()),
            },
            RepoError::DependencyUpdateFailed { .. } => CliError::Chart {
                message,
                help: None,
            },
            RepoError::PluginMissing { ref plugin, .. } => CliError::Repository {
                help: Some(format!("install it with `helm plugin install` (helm-{})", plugin)),
                message,
            },
            RepoError::ListFailed { .. }
            | RepoError::AddFailed { .. }
            | RepoError::UpdateFailed { .. }
            | RepoError::AuthFailed { .. } => CliError::Repository {
                message,
                help: None,
            },
            RepoError::HelmVersion { .. } | RepoError::MalformedOutput { .. } => {
                CliError::Helm { message }
            }
            RepoError::Io(_) => CliError::Io { message },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Io {
            message: format!("failed to encode output: {}", err),
        }
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::Io {
            message: format!("failed to encode output: {}", err),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
