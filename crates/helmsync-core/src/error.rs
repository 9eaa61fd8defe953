//! Error types for helm repository and chart operations

use thiserror::Error;

/// Repository and chart operation errors
#[derive(Debug, Error)]
pub enum RepoError {
    // ============ Input Errors ============
    #[error("Invalid repository URL for {name}: {url} - {reason}")]
    InvalidRepositoryUrl {
        name: String,
        url: String,
        reason: String,
    },

    #[error("helm repo {name} has incomplete basic auth info. Missing the password!")]
    IncompleteBasicAuth { name: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ============ Environment Errors ============
    #[error("While checking helm version: {message}")]
    HelmVersion { message: String },

    #[error("repository {url} can't be used: helm-{plugin} plugin is missing")]
    PluginMissing { plugin: String, url: String },

    #[error("Authentication failed: {message}")]
    AuthFailed { message: String },

    #[error("Unexpected output from `{command}`: {message}")]
    MalformedOutput { command: String, message: String },

    // ============ Repository Errors ============
    #[error("While listing helm repositories: {message}")]
    ListFailed { message: String },

    #[error("While adding helm repository [{name}]: {message}")]
    AddFailed { name: String, message: String },

    #[error("While updating helm repos: {message}")]
    UpdateFailed { message: String },

    // ============ Chart Errors ============
    #[error(
        "Chart [ {chart} ] with version [ {version} ] is specified but not found in the helm repositories"
    )]
    ChartNotFound { chart: String, version: String },

    #[error("Failed to update dependencies of chart [ {chart} ]: {message}")]
    DependencyUpdateFailed { chart: String, message: String },

    // ============ IO Errors ============
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepoError>;

impl RepoError {
    /// Whether the error describes a missing chart rather than a broken environment
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::ChartNotFound { .. })
    }
}

impl From<serde_yaml::Error> for RepoError {
    fn from(e: serde_yaml::Error) -> Self {
        RepoError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(e: serde_json::Error) -> Self {
        RepoError::Serialization(e.to_string())
    }
}
