//! Helm client version gate
//!
//! Decides whether optional helm flags are safe to pass. The gate is
//! advisory: an unparseable version or constraint simply does not satisfy.

use semver::{Version, VersionReq};

use crate::error::{RepoError, Result};
use crate::helm::Helm;

impl Helm {
    /// Raw output of `helm version --short -c`, trimmed
    pub async fn client_version(&self) -> Result<String> {
        let cmd = self.command(["version", "--short", "-c"], "Checking Helm version");
        let result = self.execute(&cmd).await;
        if !result.success() {
            return Err(RepoError::HelmVersion {
                message: result.stderr.trim().to_string(),
            });
        }
        Ok(result.stdout.trim().to_string())
    }

    /// Whether the helm client version satisfies `constraint`
    ///
    /// Fails only when helm cannot report its own version.
    pub async fn satisfies(&self, constraint: &str) -> Result<bool> {
        let raw = self.client_version().await?;
        Ok(version_satisfies(&raw, constraint))
    }
}

/// Check raw `helm version` output against a semver range
pub fn version_satisfies(raw: &str, constraint: &str) -> bool {
    let Some(token) = extract_version(raw) else {
        tracing::warn!("Could not find a version in helm output: {:?}", raw);
        return false;
    };

    let version = match parse_version(token) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Could not parse helm version {:?}: {}", token, e);
            return false;
        }
    };

    match VersionReq::parse(constraint) {
        Ok(req) => req.matches(&version),
        Err(e) => {
            tracing::warn!("Invalid version constraint {:?}: {}", constraint, e);
            false
        }
    }
}

/// Pull the version token out of `helm version` output
///
/// Helm 3 prints `v3.4.0+g7090a89`; helm 2 prints `Client: v2.16.1+gbbdfe5e`.
/// Only the first line is read: without `-c`, helm 2 appends a `Server:`
/// line that would otherwise end up in the token.
pub fn extract_version(raw: &str) -> Option<&str> {
    let line = raw.trim().lines().next()?.trim();
    if line.starts_with('v') {
        return Some(line);
    }
    line.split(':')
        .nth(1)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Parse a version token, tolerating a `v` prefix and missing components
pub fn parse_version(token: &str) -> std::result::Result<Version, semver::Error> {
    let token = token.trim().trim_start_matches('v');
    if let Ok(version) = Version::parse(token) {
        return Ok(version);
    }

    // `3.4` or `3.4+build`: pad the numeric core to three components
    let split = token.find(['-', '+']).unwrap_or(token.len());
    let (core, rest) = token.split_at(split);
    let mut parts: Vec<&str> = core.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    Version::parse(&format!("{}{}", parts.join("."), rest))
}
