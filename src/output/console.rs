use std::path::Path;

use crate::rules::policy::PolicyVerdict;
use crate::rules::{ComplianceReport, Finding, Verdict};
use crate::sweep::SweepReport;

/// Render a compliance report as console output, one row per directive in
/// catalogue order.
pub fn render(report: &ComplianceReport, verdict: &PolicyVerdict) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n  {} compliance report\n\n", report.catalog_id));

    for entry in &report.entries {
        let verdict_tag = match entry.verdict {
            Verdict::Compliant => "[COMPLIANT]    ",
            Verdict::Misconfigured => "[MISCONFIGURED]",
            Verdict::Missing => "[MISSING]      ",
        };

        output.push_str(&format!("  {} {}\n", verdict_tag, entry.directive));
        if let Some(message) = &entry.message {
            output.push_str(&format!("                  {}\n", message));
        }
        if let Some(remediation) = &entry.remediation {
            output.push_str(&format!("                  fix: {}\n", remediation));
        }
    }

    // Verdict
    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "\n  Score: {}/{}  Result: {} (required ratio: {})\n\n",
        report.score, report.total, status, verdict.min_ratio,
    ));

    output
}

/// Render project-settings findings for one document.
pub fn render_findings(source: &Path, findings: &[Finding]) -> String {
    let mut output = String::new();

    if findings.is_empty() {
        output.push_str(&format!(
            "\n  No disabled protections in {}.\n\n",
            source.display()
        ));
        return output;
    }

    output.push_str(&format!(
        "\n  {} disabled protection(s) in {}:\n\n",
        findings.len(),
        source.display()
    ));

    for finding in findings {
        output.push_str(&format!(
            "  [{}] {}\n",
            finding.project, finding.vulnerability
        ));
        output.push_str(&format!("           {}\n", finding.explanation));
        output.push_str(&format!("           fix: {}\n", finding.recommendation));
        output.push('\n');
    }

    output
}

/// Render a sweep report: counters first, then per-file advice, then any
/// project-settings findings.
pub fn render_sweep(report: &SweepReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n  Sweep of {}\n\n", report.root.display()));
    output.push_str(&format!(
        "  Total files analyzed:          {}\n",
        report.total_files
    ));
    output.push_str(&format!(
        "  Configuration files:           {}\n",
        report.config_files
    ));
    output.push_str(&format!(
        "  TODO mentions:                 {}\n",
        report.todo_mentions
    ));
    output.push_str(&format!(
        "  Files with cleartext secrets:  {}\n",
        report.files_with_secrets
    ));
    output.push_str(&format!(
        "  Files with insecure commands:  {}\n",
        report.files_with_insecure_commands
    ));

    let flagged: Vec<_> = report
        .records
        .iter()
        .filter(|record| record.recommendation.is_some())
        .collect();
    if !flagged.is_empty() {
        output.push_str("\n  Flagged configuration files:\n\n");
        for record in flagged {
            output.push_str(&format!(
                "  {} ({} bytes)\n",
                record.path.display(),
                record.size_bytes
            ));
            if let Some(recommendation) = &record.recommendation {
                output.push_str(&format!("           fix: {}\n", recommendation));
            }
        }
    }

    if !report.findings.is_empty() {
        output.push_str(&format!(
            "\n  {} disabled protection(s) in project settings:\n\n",
            report.findings.len()
        ));
        for finding in &report.findings {
            output.push_str(&format!(
                "  [{}] {}\n",
                finding.project, finding.vulnerability
            ));
            output.push_str(&format!("           fix: {}\n", finding.recommendation));
        }
    }

    output.push('\n');
    output
}
