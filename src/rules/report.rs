use serde::{Deserialize, Serialize};

/// Outcome of checking one directive against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Directive present and its value passes the predicate.
    Compliant,
    /// Directive present but its value fails the predicate.
    Misconfigured,
    /// No line matched the directive at all.
    Missing,
}

impl Verdict {
    /// Score deduction carried by this verdict. Misconfigured costs half
    /// of missing: the directive was at least considered.
    pub fn penalty(&self) -> f64 {
        match self {
            Self::Compliant => 0.0,
            Self::Misconfigured => 0.5,
            Self::Missing => 1.0,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compliant => write!(f, "compliant"),
            Self::Misconfigured => write!(f, "misconfigured"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// One row of a compliance report. Rows appear in catalogue order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub directive: String,
    pub verdict: Verdict,
    /// Advice for non-compliant rows; None when compliant.
    pub message: Option<String>,
    /// The config line to add or fix; None when compliant.
    pub remediation: Option<String>,
}

impl ReportEntry {
    pub fn compliant(directive: &str) -> Self {
        Self {
            directive: directive.to_string(),
            verdict: Verdict::Compliant,
            message: None,
            remediation: None,
        }
    }

    pub fn misconfigured(directive: &str, message: &str, remediation: &str) -> Self {
        Self {
            directive: directive.to_string(),
            verdict: Verdict::Misconfigured,
            message: Some(message.to_string()),
            remediation: Some(remediation.to_string()),
        }
    }

    pub fn missing(directive: &str, message: &str, remediation: &str) -> Self {
        Self {
            directive: directive.to_string(),
            verdict: Verdict::Missing,
            message: Some(message.to_string()),
            remediation: Some(remediation.to_string()),
        }
    }
}

/// Result of evaluating one catalogue against one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub catalog_id: String,
    pub entries: Vec<ReportEntry>,
    /// Catalogue size minus the per-row penalties. A fully hardened
    /// document scores `total`; a document matching nothing scores 0.
    pub score: f64,
    pub total: usize,
}

impl ComplianceReport {
    pub fn compliant_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.verdict == Verdict::Compliant)
            .count()
    }
}

/// Fold report rows into the final scored report.
pub fn aggregate(catalog_id: &str, entries: Vec<ReportEntry>) -> ComplianceReport {
    let total = entries.len();
    let penalty: f64 = entries.iter().map(|e| e.verdict.penalty()).sum();
    ComplianceReport {
        catalog_id: catalog_id.to_string(),
        entries,
        score: total as f64 - penalty,
        total,
    }
}

/// A disabled protection flagged in a structured project document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Project the finding belongs to.
    pub project: String,
    pub vulnerability: String,
    pub explanation: String,
    pub recommendation: String,
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_entry() -> impl Strategy<Value = ReportEntry> {
        prop_oneof![
            Just(ReportEntry::compliant("D")),
            Just(ReportEntry::misconfigured("D", "m", "r")),
            Just(ReportEntry::missing("D", "m", "r")),
        ]
    }

    proptest! {
        #[test]
        fn score_stays_within_bounds(entries in proptest::collection::vec(arb_entry(), 0..64)) {
            let report = aggregate("demo", entries);
            prop_assert!(report.score >= 0.0);
            prop_assert!(report.score <= report.total as f64);
        }

        #[test]
        fn score_moves_in_half_steps(entries in proptest::collection::vec(arb_entry(), 0..64)) {
            let report = aggregate("demo", entries);
            let doubled = report.score * 2.0;
            prop_assert_eq!(doubled, doubled.round());
        }

        #[test]
        fn total_equals_entry_count(entries in proptest::collection::vec(arb_entry(), 0..64)) {
            let count = entries.len();
            let report = aggregate("demo", entries);
            prop_assert_eq!(report.total, count);
            prop_assert_eq!(report.entries.len(), count);
        }
    }
}
