//! Chart references and metadata
//!
//! A chart is referenced either by a filesystem path or by a `repo/chart`
//! name. The distinction is made once, by [`ChartRef::classify`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A classified chart reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartRef {
    /// Chart directory or archive on the local filesystem
    Local(PathBuf),
    /// Chart served by a registered repository (`repo/chart`)
    ///
    /// `repo` is empty for bare names and URL-style references.
    Remote { repo: String, chart: String },
}

impl ChartRef {
    /// Classify a raw chart reference
    ///
    /// Rules, first match wins:
    /// 1. anything with a `://` scheme (e.g. `oci://`) is remote
    /// 2. explicit paths (`/x`, `./x`, `../x`, `~/x`, `.`), `.tgz` archives
    ///    and references containing `\` are local
    /// 3. a single `repo/chart` token is remote, unless a directory with
    ///    that relative path exists, e.g. `charts/app` next to the state file
    /// 4. anything else with a `/` is local; a bare name is remote
    pub fn classify(reference: &str) -> Self {
        let reference = reference.trim();

        if reference.contains("://") {
            return ChartRef::Remote {
                repo: String::new(),
                chart: reference.to_string(),
            };
        }

        if is_explicit_path(reference) {
            return ChartRef::Local(PathBuf::from(reference));
        }

        match reference.split_once('/') {
            Some((repo, chart)) if is_name_token(repo) && is_name_token(chart) => {
                if Path::new(reference).is_dir() {
                    ChartRef::Local(PathBuf::from(reference))
                } else {
                    ChartRef::Remote {
                        repo: repo.to_string(),
                        chart: chart.to_string(),
                    }
                }
            }
            Some(_) => ChartRef::Local(PathBuf::from(reference)),
            None => ChartRef::Remote {
                repo: String::new(),
                chart: reference.to_string(),
            },
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ChartRef::Local(_))
    }

    /// Best guess at the repository a reference belongs to
    ///
    /// For a local path this is the parent directory name, which is what a
    /// mistyped `repo/chart` reference looks like once taken as a path.
    pub fn suggested_repo(&self) -> Option<String> {
        match self {
            ChartRef::Local(path) => path
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned()),
            ChartRef::Remote { repo, .. } if !repo.is_empty() => Some(repo.clone()),
            ChartRef::Remote { .. } => None,
        }
    }
}

impl fmt::Display for ChartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartRef::Local(path) => write!(f, "{}", path.display()),
            ChartRef::Remote { repo, chart } if repo.is_empty() => write!(f, "{}", chart),
            ChartRef::Remote { repo, chart } => write!(f, "{}/{}", repo, chart),
        }
    }
}

fn is_explicit_path(reference: &str) -> bool {
    reference == "."
        || reference == ".."
        || reference.starts_with('/')
        || reference.starts_with("./")
        || reference.starts_with("../")
        || reference.starts_with("~/")
        || reference.ends_with(".tgz")
        || reference.contains('\\')
}

fn is_name_token(part: &str) -> bool {
    !part.is_empty()
        && !part.starts_with('.')
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Chart metadata as printed by `helm show chart`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInfo {
    /// Chart name
    pub name: String,

    /// Chart version
    pub version: String,

    /// Chart API version (v1 or v2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Version of the packaged application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    /// One-line description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Chart type (application or library)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,

    /// Any other declared fields (maintainers, dependencies, annotations, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// One chart to validate, shared by every app that deploys it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    /// Comma-separated names of the apps using this chart
    pub apps: String,
    /// Raw chart reference
    pub chart: String,
    /// Requested version constraint (may be empty)
    pub version: String,
}

impl ChartRequest {
    pub fn new(apps: impl Into<String>, chart: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            apps: apps.into(),
            chart: chart.into(),
            version: version.into(),
        }
    }

    /// Group `(app, chart, version)` triples so each distinct chart is checked once
    pub fn group<'a, I>(apps: I) -> Vec<ChartRequest>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let mut grouped: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();
        for (app, chart, version) in apps {
            grouped.entry((chart, version)).or_default().push(app);
        }

        grouped
            .into_iter()
            .map(|((chart, version), mut names)| {
                names.sort_unstable();
                ChartRequest::new(names.join(", "), chart, version)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_remote() {
        assert_eq!(
            ChartRef::classify("bitnami/nginx"),
            ChartRef::Remote {
                repo: "bitnami".to_string(),
                chart: "nginx".to_string()
            }
        );
        assert_eq!(
            ChartRef::classify("nginx"),
            ChartRef::Remote {
                repo: String::new(),
                chart: "nginx".to_string()
            }
        );
        assert!(!ChartRef::classify("oci://registry.example.com/charts/app").is_local());
    }

    #[test]
    fn test_classify_local() {
        assert!(ChartRef::classify("./charts/app").is_local());
        assert!(ChartRef::classify("../app").is_local());
        assert!(ChartRef::classify("/srv/charts/app").is_local());
        assert!(ChartRef::classify("~/charts/app").is_local());
        assert!(ChartRef::classify("app-1.0.0.tgz").is_local());
        assert!(ChartRef::classify("charts/platform/app").is_local());
        assert!(ChartRef::classify(".").is_local());
    }

    #[test]
    fn test_classify_existing_directory_is_local() {
        // Relative to the crate root, where `cargo test` runs
        let repo_dir = tempfile::Builder::new()
            .prefix("chartrepo")
            .tempdir_in(".")
            .unwrap();
        std::fs::create_dir(repo_dir.path().join("nginx")).unwrap();
        let repo_name = repo_dir.path().file_name().unwrap().to_string_lossy().into_owned();
        let reference = format!("{}/nginx", repo_name);

        assert_eq!(
            ChartRef::classify(&reference),
            ChartRef::Local(PathBuf::from(&reference))
        );
        assert_eq!(
            ChartRef::classify(&format!("{}/postgresql", repo_name)),
            ChartRef::Remote {
                repo: repo_name.clone(),
                chart: "postgresql".to_string()
            }
        );
    }

    #[test]
    fn test_suggested_repo() {
        assert_eq!(
            ChartRef::classify("/charts/stable/nginx").suggested_repo(),
            Some("stable".to_string())
        );
        assert_eq!(
            ChartRef::classify("bitnami/nginx").suggested_repo(),
            Some("bitnami".to_string())
        );
        assert_eq!(ChartRef::classify("nginx").suggested_repo(), None);
    }

    #[test]
    fn test_display_roundtrips_reference() {
        for reference in ["bitnami/nginx", "nginx", "./charts/app"] {
            assert_eq!(ChartRef::classify(reference).to_string(), reference);
        }
    }

    #[test]
    fn test_chart_info_keeps_extra_fields() {
        let yaml = r#"
apiVersion: v2
name: nginx
version: 15.0.0
appVersion: "1.25.1"
type: application
keywords:
  - web
"#;
        let info: ChartInfo = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(info.name, "nginx");
        assert_eq!(info.version, "15.0.0");
        assert_eq!(info.app_version.as_deref(), Some("1.25.1"));
        assert_eq!(info.chart_type.as_deref(), Some("application"));
        assert!(info.extra.contains_key("keywords"));
    }

    #[test]
    fn test_group_requests() {
        let requests = ChartRequest::group([
            ("web", "bitnami/nginx", "15.0.0"),
            ("api", "bitnami/nginx", "15.0.0"),
            ("db", "bitnami/postgresql", "12.1.0"),
        ]);

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], ChartRequest::new("api, web", "bitnami/nginx", "15.0.0"));
        assert_eq!(requests[1].apps, "db");
    }
}
