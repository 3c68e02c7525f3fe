//! Plain-text summary rendering.
//!
//! One line per fact, no indentation or styling. This is the format meant
//! for results files that get diffed between runs, so the line set and
//! ordering are stable.

use std::path::Path;

use crate::rules::policy::PolicyVerdict;
use crate::rules::{ComplianceReport, Finding, Verdict};
use crate::sweep::SweepReport;

/// Summarize a compliance report: header lines, then one line per
/// non-compliant directive with its remediation.
pub fn render(report: &ComplianceReport, verdict: &PolicyVerdict) -> String {
    let mut output = String::new();

    output.push_str(&format!("Catalogue: {}\n", report.catalog_id));
    output.push_str(&format!("Score: {}/{}\n", report.score, report.total));
    output.push_str(&format!(
        "Result: {}\n",
        if verdict.pass { "PASS" } else { "FAIL" }
    ));

    for entry in &report.entries {
        if entry.verdict == Verdict::Compliant {
            continue;
        }
        output.push_str(&format!(
            "{}: {}\n",
            entry.directive,
            entry.remediation.as_deref().unwrap_or("review manually")
        ));
    }

    output
}

/// Summarize project-settings findings, one line per finding.
pub fn render_findings(source: &Path, findings: &[Finding]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Source: {}\n", source.display()));
    output.push_str(&format!("Findings: {}\n", findings.len()));
    for finding in findings {
        output.push_str(&format!(
            "{}: {}\n",
            finding.project, finding.vulnerability
        ));
    }

    output
}

/// Summarize a sweep: one line per counter, then one `path: advice` line
/// per flagged file.
pub fn render_sweep(report: &SweepReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Total files analyzed: {}\n", report.total_files));
    output.push_str(&format!("Configuration files: {}\n", report.config_files));
    output.push_str(&format!("TODO mentions: {}\n", report.todo_mentions));
    output.push_str(&format!(
        "Files with cleartext secrets: {}\n",
        report.files_with_secrets
    ));
    output.push_str(&format!(
        "Files with insecure commands: {}\n",
        report.files_with_insecure_commands
    ));

    for record in &report.records {
        if let Some(recommendation) = &record.recommendation {
            output.push_str(&format!(
                "{}: {}\n",
                record.path.display(),
                recommendation
            ));
        }
    }

    for finding in &report.findings {
        output.push_str(&format!(
            "{} / {}: {}\n",
            finding.project, finding.vulnerability, finding.recommendation
        ));
    }

    output
}
