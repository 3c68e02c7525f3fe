//! confaudit — Rule-based configuration compliance scanner.
//!
//! Offline, deterministic, JSON-friendly. Audits line-oriented server
//! configs (sshd_config, apache2.conf, nginx.conf) against ordered
//! hardening catalogues, checks GitLab project settings for disabled
//! protections, and sweeps directory trees for cleartext secrets and
//! insecure commands.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use confaudit::{audit, AuditOptions, AuditOutcome};
//!
//! let options = AuditOptions::default();
//! let outcome = audit(Path::new("/etc/ssh/sshd_config"), &options).unwrap();
//! if let AuditOutcome::Compliance { report, verdict } = &outcome {
//!     println!("Score: {}/{}, Pass: {}", report.score, report.total, verdict.pass);
//! }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod sweep;

use std::path::{Path, PathBuf};

use config::Config;
use error::{AuditError, Result};
use output::OutputFormat;
use rules::policy::PolicyVerdict;
use rules::{builtin, ComplianceReport, Dialect, Finding};

/// Options for an audit invocation.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Catalogue to audit against; `None` auto-detects from the file name.
    pub dialect: Option<Dialect>,
    /// Path to config file (defaults to `.confaudit.toml` next to the target).
    pub config_path: Option<PathBuf>,
    /// CLI override for the pass ratio.
    pub min_ratio_override: Option<f64>,
}

/// Result of auditing one configuration document.
#[derive(Debug)]
pub enum AuditOutcome {
    /// Line-oriented dialect: a scored report plus the policy verdict.
    Compliance {
        report: ComplianceReport,
        verdict: PolicyVerdict,
    },
    /// Structured dialect: findings for disabled protections.
    Flags {
        source: PathBuf,
        findings: Vec<Finding>,
    },
}

impl AuditOutcome {
    /// The pass/fail decision: the policy verdict for compliance reports,
    /// zero findings for flag audits.
    pub fn pass(&self) -> bool {
        match self {
            Self::Compliance { verdict, .. } => verdict.pass,
            Self::Flags { findings, .. } => findings.is_empty(),
        }
    }
}

/// Audit one configuration file: resolve the dialect, load the document,
/// evaluate the catalogue, apply policy.
pub fn audit(path: &Path, options: &AuditOptions) -> Result<AuditOutcome> {
    // Load config
    let config_path = options.config_path.clone().unwrap_or_else(|| {
        path.parent()
            .unwrap_or_else(|| Path::new("."))
            .join(".confaudit.toml")
    });
    let mut config = Config::load(&config_path)?;

    // Apply CLI override
    if let Some(min_ratio) = options.min_ratio_override {
        config.policy.min_ratio = min_ratio;
    }

    let dialect = match options.dialect {
        Some(dialect) => dialect,
        None => Dialect::detect(path)
            .ok_or_else(|| AuditError::DetectFailed(path.display().to_string()))?,
    };

    match dialect.line_catalog() {
        Some(catalog) => {
            let doc = document::ConfigDocument::read(path)?;
            let effective = config.policy.apply(catalog);
            let report = rules::evaluate(&effective, &doc);
            let verdict = config.policy.evaluate(&report);
            Ok(AuditOutcome::Compliance { report, verdict })
        }
        None => {
            let tree = document::read_yaml(path)?;
            let findings = rules::evaluate_flags(builtin::flag_catalog(), &tree);
            Ok(AuditOutcome::Flags {
                source: path.to_path_buf(),
                findings,
            })
        }
    }
}

/// Sweep a directory tree, extending the built-in content patterns with
/// any extras from `config`.
pub fn sweep_path(root: &Path, config: &Config) -> Result<sweep::SweepReport> {
    let options = sweep::SweepOptions {
        keywords: scanner::keyword_set(&config.scanner.extra_keywords),
        commands: scanner::command_set(&config.scanner.extra_commands),
        flag_catalog: builtin::flag_catalog(),
    };
    sweep::sweep(root, &options)
}

/// Render an audit outcome in the specified format.
pub fn render_outcome(outcome: &AuditOutcome, format: OutputFormat) -> Result<String> {
    match outcome {
        AuditOutcome::Compliance { report, verdict } => output::render(report, verdict, format),
        AuditOutcome::Flags { source, findings } => {
            output::render_findings(source, findings, format)
        }
    }
}
