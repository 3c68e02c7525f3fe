use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::rules::policy::PolicyVerdict;
use crate::rules::{ComplianceReport, Finding};
use crate::sweep::SweepReport;

#[derive(Serialize)]
struct JsonReport<'a> {
    report: &'a ComplianceReport,
    verdict: &'a PolicyVerdict,
}

/// Render a compliance report and its policy verdict as a JSON document.
pub fn render(report: &ComplianceReport, verdict: &PolicyVerdict) -> Result<String> {
    let json = serde_json::to_string_pretty(&JsonReport { report, verdict })?;
    Ok(json)
}

#[derive(Serialize)]
struct JsonFindings<'a> {
    source: &'a Path,
    findings: &'a [Finding],
}

/// Render project-settings findings as a JSON document.
pub fn render_findings(source: &Path, findings: &[Finding]) -> Result<String> {
    let json = serde_json::to_string_pretty(&JsonFindings { source, findings })?;
    Ok(json)
}

/// Render a sweep report as a JSON document.
pub fn render_sweep(report: &SweepReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}
