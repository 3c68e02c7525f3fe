use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::model::Catalog;
use super::report::ComplianceReport;

/// Policy verdict: the pass/fail decision the CLI turns into an exit code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub score: f64,
    pub total: usize,
    pub min_ratio: f64,
}

/// Policy configuration loaded from `.confaudit.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Minimum score/total ratio to pass. 1.0 requires full compliance.
    #[serde(default = "default_min_ratio")]
    pub min_ratio: f64,
    /// Directives dropped from the catalogue before evaluation.
    #[serde(default)]
    pub ignore_directives: HashSet<String>,
}

fn default_min_ratio() -> f64 {
    1.0
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_ratio: 1.0,
            ignore_directives: HashSet::new(),
        }
    }
}

impl Policy {
    /// Remove ignored directives from a catalogue. Score and total shrink
    /// together, so an ignored rule neither penalizes nor rewards.
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        if self.ignore_directives.is_empty() {
            return catalog.clone();
        }
        let rules = catalog
            .rules
            .iter()
            .filter(|rule| !self.ignore_directives.contains(&rule.directive))
            .cloned()
            .collect();
        Catalog::new(&catalog.id, rules)
    }

    /// Compare a report's score against the required ratio. An empty
    /// catalogue passes.
    pub fn evaluate(&self, report: &ComplianceReport) -> PolicyVerdict {
        let required = self.min_ratio * report.total as f64;
        PolicyVerdict {
            pass: report.score >= required,
            score: report.score,
            total: report.total,
            min_ratio: self.min_ratio,
        }
    }
}
