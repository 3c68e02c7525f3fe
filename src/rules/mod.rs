pub mod builtin;
pub mod model;
pub mod policy;
pub mod report;

use crate::document::{ConfigDocument, TreeNode};

pub use builtin::Dialect;
pub use model::{Catalog, FlagCatalog, FlagRule, Predicate, Rule, RuleSummary};
pub use report::{aggregate, ComplianceReport, Finding, ReportEntry, Verdict};

/// Evaluate a directive catalogue against a line document.
///
/// Rules run in catalogue order. For each rule the document is scanned
/// top-down and the first matching line decides the verdict; later lines
/// for the same directive are ignored. A rule with no matching line at
/// all reports the directive as missing.
pub fn evaluate(catalog: &Catalog, document: &ConfigDocument) -> ComplianceReport {
    let entries = catalog
        .rules
        .iter()
        .map(|rule| {
            match document.lines().find_map(|line| rule.capture(line)) {
                Some(value) if rule.predicate.holds(value) => {
                    ReportEntry::compliant(&rule.directive)
                }
                Some(_) => {
                    ReportEntry::misconfigured(&rule.directive, &rule.message, &rule.remediation)
                }
                None => ReportEntry::missing(&rule.directive, &rule.message, &rule.remediation),
            }
        })
        .collect();
    report::aggregate(&catalog.id, entries)
}

/// Evaluate a flag catalogue against a structured document.
///
/// Walks the `projects` sequence in document order and, per project, the
/// flag rules in catalogue order. A finding fires only when a rule's key
/// is present in the project's config block with a falsy value. Nodes
/// that do not have the expected shape are skipped so well-formed
/// siblings still produce findings.
pub fn evaluate_flags(catalog: &FlagCatalog, tree: &TreeNode) -> Vec<Finding> {
    let mut findings = Vec::new();

    let projects = match tree.get("projects").and_then(TreeNode::as_sequence) {
        Some(projects) => projects,
        None => {
            tracing::debug!("document has no projects sequence, nothing to check");
            return findings;
        }
    };

    for project in projects {
        let entries = match project.as_mapping() {
            Some(entries) => entries,
            None => {
                tracing::debug!("skipping projects entry that is not a mapping");
                continue;
            }
        };
        for (name, config) in entries {
            if config.as_mapping().is_none() {
                tracing::debug!(project = %name, "skipping project without a config mapping");
                continue;
            }
            for rule in &catalog.rules {
                if let Some(value) = config.get(&rule.key) {
                    if value.is_falsy() {
                        findings.push(Finding {
                            project: name.clone(),
                            vulnerability: rule.vulnerability.clone(),
                            explanation: rule.explanation.clone(),
                            recommendation: rule.recommendation.clone(),
                        });
                    }
                }
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{parse_yaml, ConfigDocument};
    use pretty_assertions::assert_eq;

    fn demo_catalog() -> Catalog {
        Catalog::new(
            "demo",
            vec![
                Rule::new(
                    "PermitRootLogin",
                    r"PermitRootLogin\s+(\w+)",
                    Predicate::EqualsIgnoreCase("no"),
                    "Disable direct root login",
                    "PermitRootLogin no",
                )
                .unwrap(),
                Rule::new(
                    "MaxAuthTries",
                    r"MaxAuthTries\s+(\d+)",
                    Predicate::IntAtMost(3),
                    "Limit authentication attempts",
                    "MaxAuthTries 3",
                )
                .unwrap(),
            ],
        )
    }

    fn demo_flags() -> FlagCatalog {
        FlagCatalog::new(
            "flags",
            vec![FlagRule::new(
                "password",
                "Cleartext password",
                "why it matters",
                "hash it",
            )],
        )
    }

    #[test]
    fn compliant_line_passes() {
        let doc = ConfigDocument::from_text("PermitRootLogin no\nMaxAuthTries 3\n");
        let report = evaluate(&demo_catalog(), &doc);
        assert_eq!(report.score, 2.0);
        assert!(report.entries.iter().all(|e| e.verdict == Verdict::Compliant));
    }

    #[test]
    fn first_match_wins_over_later_lines() {
        let doc = ConfigDocument::from_text("PermitRootLogin yes\nPermitRootLogin no\n");
        let report = evaluate(&demo_catalog(), &doc);
        assert_eq!(report.entries[0].verdict, Verdict::Misconfigured);
    }

    #[test]
    fn absent_directive_reports_missing() {
        let doc = ConfigDocument::from_text("X11Forwarding no\n");
        let report = evaluate(&demo_catalog(), &doc);
        assert_eq!(report.entries[0].verdict, Verdict::Missing);
        assert_eq!(report.entries[1].verdict, Verdict::Missing);
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn entry_order_follows_catalogue_not_document() {
        let doc = ConfigDocument::from_text("MaxAuthTries 3\nPermitRootLogin no\n");
        let report = evaluate(&demo_catalog(), &doc);
        let directives: Vec<&str> = report
            .entries
            .iter()
            .map(|e| e.directive.as_str())
            .collect();
        assert_eq!(directives, vec!["PermitRootLogin", "MaxAuthTries"]);
    }

    #[test]
    fn garbled_value_reads_as_misconfigured() {
        let doc = ConfigDocument::from_text("MaxAuthTries many\nPermitRootLogin no\n");
        let report = evaluate(&demo_catalog(), &doc);
        assert_eq!(report.entries[1].verdict, Verdict::Misconfigured);
        assert_eq!(report.score, 1.5);
    }

    #[test]
    fn compliant_rows_carry_no_remediation() {
        let doc = ConfigDocument::from_text("PermitRootLogin no\n");
        let report = evaluate(&demo_catalog(), &doc);
        assert!(report.entries[0].message.is_none());
        assert!(report.entries[0].remediation.is_none());
        assert!(report.entries[1].message.is_some());
        assert!(report.entries[1].remediation.is_some());
    }

    #[test]
    fn falsy_flag_value_fires_finding() {
        let tree = parse_yaml("projects:\n  - demo:\n      password: false\n").unwrap();
        let findings = evaluate_flags(&demo_flags(), &tree);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].project, "demo");
        assert_eq!(findings[0].vulnerability, "Cleartext password");
    }

    #[test]
    fn absent_flag_key_is_not_a_violation() {
        let tree = parse_yaml("projects:\n  - demo:\n      other: true\n").unwrap();
        assert!(evaluate_flags(&demo_flags(), &tree).is_empty());
    }

    #[test]
    fn truthy_flag_value_is_compliant() {
        let tree = parse_yaml("projects:\n  - demo:\n      password: hunter2\n").unwrap();
        assert!(evaluate_flags(&demo_flags(), &tree).is_empty());
    }

    #[test]
    fn malformed_project_entries_are_skipped_not_fatal() {
        let tree = parse_yaml(
            "projects:\n  - just-a-string\n  - demo:\n      password: 0\n  - other: 12\n",
        )
        .unwrap();
        let findings = evaluate_flags(&demo_flags(), &tree);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].project, "demo");
    }

    #[test]
    fn document_without_projects_yields_nothing() {
        let tree = parse_yaml("pipeline:\n  stages: [build]\n").unwrap();
        assert!(evaluate_flags(&demo_flags(), &tree).is_empty());
    }

    #[test]
    fn findings_follow_project_then_catalogue_order() {
        let catalog = FlagCatalog::new(
            "flags",
            vec![
                FlagRule::new("alpha", "A", "a", "fix a"),
                FlagRule::new("beta", "B", "b", "fix b"),
            ],
        );
        let tree = parse_yaml(
            "projects:\n  - one:\n      beta: false\n      alpha: false\n  - two:\n      alpha: 0\n",
        )
        .unwrap();
        let findings = evaluate_flags(&catalog, &tree);
        let labels: Vec<(&str, &str)> = findings
            .iter()
            .map(|f| (f.project.as_str(), f.vulnerability.as_str()))
            .collect();
        assert_eq!(labels, vec![("one", "A"), ("one", "B"), ("two", "A")]);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::document::ConfigDocument;
    use proptest::prelude::*;

    fn arb_document() -> impl Strategy<Value = ConfigDocument> {
        proptest::collection::vec("[ -~]{0,40}", 0..40)
            .prop_map(|lines| ConfigDocument::from_text(&lines.join("\n")))
    }

    proptest! {
        #[test]
        fn evaluation_is_deterministic(doc in arb_document()) {
            let catalog = builtin::ssh::catalog();
            let first = serde_json::to_string(&evaluate(catalog, &doc)).unwrap();
            let second = serde_json::to_string(&evaluate(catalog, &doc)).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn entries_always_follow_catalogue_order(doc in arb_document()) {
            let catalog = builtin::ssh::catalog();
            let report = evaluate(catalog, &doc);
            let got: Vec<&str> = report.entries.iter().map(|e| e.directive.as_str()).collect();
            let want: Vec<String> = catalog.rules.iter().map(|r| r.directive.clone()).collect();
            prop_assert_eq!(got, want);
        }

        #[test]
        fn score_never_leaves_bounds(doc in arb_document()) {
            let catalog = builtin::ssh::catalog();
            let report = evaluate(catalog, &doc);
            prop_assert_eq!(report.total, catalog.len());
            prop_assert!(report.score >= 0.0);
            prop_assert!(report.score <= report.total as f64);
        }
    }
}
