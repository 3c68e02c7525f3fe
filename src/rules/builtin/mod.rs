pub mod apache;
pub mod gitlab;
pub mod nginx;
pub mod ssh;

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{Catalog, FlagCatalog, Predicate, Rule, RuleSummary};

/// Which built-in catalogue a document is audited against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Ssh,
    Apache,
    Nginx,
    Gitlab,
}

impl Dialect {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ssh" | "sshd" | "openssh" => Some(Self::Ssh),
            "apache" | "apache2" | "httpd" => Some(Self::Apache),
            "nginx" => Some(Self::Nginx),
            "gitlab" | "gitlab-project" => Some(Self::Gitlab),
            _ => None,
        }
    }

    /// Guess the dialect from a file name. An explicit `--dialect` flag
    /// overrides this.
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name().map(|n| n.to_string_lossy().to_lowercase())?;
        if name.starts_with("sshd_config") || name.starts_with("ssh_config") {
            Some(Self::Ssh)
        } else if name.starts_with("apache2") || name.starts_with("httpd") {
            Some(Self::Apache)
        } else if name.starts_with("nginx") {
            Some(Self::Nginx)
        } else if name.ends_with(".yml") || name.ends_with(".yaml") {
            Some(Self::Gitlab)
        } else {
            None
        }
    }

    /// The line catalogue for this dialect; None for the structured one.
    pub fn line_catalog(&self) -> Option<&'static Catalog> {
        match self {
            Self::Ssh => Some(ssh::catalog()),
            Self::Apache => Some(apache::catalog()),
            Self::Nginx => Some(nginx::catalog()),
            Self::Gitlab => None,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ssh => write!(f, "ssh"),
            Self::Apache => write!(f, "apache"),
            Self::Nginx => write!(f, "nginx"),
            Self::Gitlab => write!(f, "gitlab"),
        }
    }
}

/// All built-in line catalogues, in a stable listing order.
pub fn line_catalogs() -> Vec<&'static Catalog> {
    vec![ssh::catalog(), apache::catalog(), nginx::catalog()]
}

/// The built-in flag catalogue for project settings documents.
pub fn flag_catalog() -> &'static FlagCatalog {
    gitlab::catalog()
}

/// `list-rules` rows for every built-in rule, line and flag alike.
pub fn all_summaries() -> Vec<RuleSummary> {
    let mut rows: Vec<RuleSummary> = line_catalogs()
        .iter()
        .flat_map(|catalog| catalog.summaries())
        .collect();
    rows.extend(flag_catalog().summaries());
    rows
}

fn rule(
    directive: &str,
    pattern: &str,
    predicate: Predicate,
    message: &str,
    remediation: &str,
) -> Rule {
    Rule::new(directive, pattern, predicate, message, remediation).unwrap()
}
