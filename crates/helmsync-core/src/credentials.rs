//! Repository credentials and cloud storage authentication
//!
//! Key security properties:
//! - Basic-auth credentials embedded in a repository URL are moved into
//!   separate `--username`/`--password` arguments
//! - The URL handed to helm never carries user-info
//! - Passwords are never rendered by `Debug` or in error messages

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::error::{RepoError, Result};

/// URL prefix of Google Cloud Storage backed repositories
pub const CLOUD_STORAGE_SCHEME: &str = "gs://";

/// Helm plugin required to use [`CLOUD_STORAGE_SCHEME`] repositories
pub const CLOUD_STORAGE_PLUGIN: &str = "gcs";

/// Environment variable naming a service account key file
pub const GOOGLE_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Username/password pair taken from a repository URL
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Arguments for `helm repo add`
    pub fn args(&self) -> [String; 4] {
        [
            "--username".to_string(),
            self.username.clone(),
            "--password".to_string(),
            self.password.clone(),
        ]
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A repository as it should be registered in helm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredRepository {
    /// Repository name
    pub name: String,
    /// URL without user-info
    pub url: String,
    /// Credentials extracted from the original URL
    pub credentials: Option<BasicAuth>,
}

impl DesiredRepository {
    /// Validate a repository URL and split out embedded credentials
    ///
    /// A URL without user-info is kept verbatim. A URL with a username but
    /// no password is rejected.
    pub fn parse(name: impl Into<String>, raw_url: &str) -> Result<Self> {
        let name = name.into();
        let mut url = Url::parse(raw_url).map_err(|e| RepoError::InvalidRepositoryUrl {
            name: name.clone(),
            url: redact_unparsed(raw_url),
            reason: e.to_string(),
        })?;

        if url.username().is_empty() && url.password().is_none() {
            return Ok(Self {
                name,
                url: raw_url.to_string(),
                credentials: None,
            });
        }

        // `Url` drops an empty password, so `token:@host` has to be read from the raw text
        let password = match url.password() {
            Some(password) => decode_component(&name, password)?,
            None if has_password_separator(raw_url) => String::new(),
            None => return Err(RepoError::IncompleteBasicAuth { name }),
        };

        let credentials = BasicAuth::new(decode_component(&name, url.username())?, password);

        url.set_password(None)
            .and_then(|()| url.set_username(""))
            .map_err(|()| RepoError::InvalidRepositoryUrl {
                name: name.clone(),
                url: redact_unparsed(raw_url),
                reason: "credentials cannot be removed from this URL".to_string(),
            })?;

        Ok(Self {
            name,
            url: url.to_string(),
            credentials: Some(credentials),
        })
    }

    /// Whether the repository lives in cloud object storage
    pub fn is_cloud_storage(&self) -> bool {
        self.url.starts_with(CLOUD_STORAGE_SCHEME)
    }

    /// Whether a registered URL already points at this repository
    pub fn matches_url(&self, registered: &str) -> bool {
        self.url.trim_end_matches('/') == registered.trim_end_matches('/')
    }

    /// Arguments for `helm repo add`
    pub fn add_args(&self, force_update: bool) -> Vec<String> {
        let mut args = vec!["repo".to_string(), "add".to_string()];
        if force_update {
            args.push("--force-update".to_string());
        }
        args.push(self.name.clone());
        args.push(self.url.clone());
        if let Some(credentials) = &self.credentials {
            args.extend(credentials.args());
        }
        args
    }
}

fn decode_component(name: &str, component: &str) -> Result<String> {
    urlencoding::decode(component)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| RepoError::InvalidRepositoryUrl {
            name: name.to_string(),
            url: String::new(),
            reason: format!("user-info is not valid UTF-8: {}", e),
        })
}

/// Whether the user-info of a raw URL has a `user:password` separator
fn has_password_separator(raw_url: &str) -> bool {
    let rest = raw_url.split_once("://").map_or(raw_url, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    authority
        .rsplit_once('@')
        .is_some_and(|(user_info, _)| user_info.contains(':'))
}

/// Drop anything that could be user-info from a URL we failed to parse
fn redact_unparsed(raw_url: &str) -> String {
    match raw_url.rsplit_once('@') {
        Some((_, host)) => format!("***@{}", host),
        None => raw_url.to_string(),
    }
}

/// Authenticates against a cloud storage backend before its repositories are added
#[async_trait]
pub trait CloudAuthenticator: Send + Sync {
    /// Succeeds with an informational message, or fails with the reason
    async fn authenticate(&self) -> Result<String>;
}

/// Google Cloud Storage authentication via a service account key file
#[derive(Debug, Clone, Default)]
pub struct GcsAuthenticator {
    credentials_file: Option<PathBuf>,
}

impl GcsAuthenticator {
    /// Use the key file named by `GOOGLE_APPLICATION_CREDENTIALS`, if set
    pub fn from_env() -> Self {
        Self {
            credentials_file: std::env::var_os(GOOGLE_CREDENTIALS_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Use an explicit key file
    pub fn with_credentials_file(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_file: Some(path.into()),
        }
    }
}

#[async_trait]
impl CloudAuthenticator for GcsAuthenticator {
    async fn authenticate(&self) -> Result<String> {
        // No key configured: the bucket may be public, let helm-gcs decide
        let Some(path) = &self.credentials_file else {
            return Ok(format!(
                "{} is not set, assuming the bucket is publicly readable",
                GOOGLE_CREDENTIALS_ENV
            ));
        };

        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Ok(format!("Using Google Cloud credentials from {}", path.display()))
        } else {
            Err(RepoError::AuthFailed {
                message: format!(
                    "{} points to {}, which does not exist",
                    GOOGLE_CREDENTIALS_ENV,
                    path.display()
                ),
            })
        }
    }
}

/// Authenticator that always succeeds
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuthenticator;

#[async_trait]
impl CloudAuthenticator for NoopAuthenticator {
    async fn authenticate(&self) -> Result<String> {
        Ok("authentication skipped".to_string())
    }
}
