pub mod console;
pub mod json;
pub mod summary;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::policy::PolicyVerdict;
use crate::rules::{ComplianceReport, Finding};
use crate::sweep::SweepReport;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Summary,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "summary" | "plain" => Some(Self::Summary),
            _ => None,
        }
    }
}

/// Render a scored compliance report into the specified format.
pub fn render(
    report: &ComplianceReport,
    verdict: &PolicyVerdict,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(report, verdict)),
        OutputFormat::Json => json::render(report, verdict),
        OutputFormat::Summary => Ok(summary::render(report, verdict)),
    }
}

/// Render project-settings findings into the specified format.
pub fn render_findings(
    source: &Path,
    findings: &[Finding],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render_findings(source, findings)),
        OutputFormat::Json => json::render_findings(source, findings),
        OutputFormat::Summary => Ok(summary::render_findings(source, findings)),
    }
}

/// Render a directory sweep report into the specified format.
pub fn render_sweep(report: &SweepReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render_sweep(report)),
        OutputFormat::Json => json::render_sweep(report),
        OutputFormat::Summary => Ok(summary::render_sweep(report)),
    }
}
