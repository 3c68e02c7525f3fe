//! Hardening catalogue for Apache httpd configuration (`apache2.conf`).

use once_cell::sync::Lazy;

use crate::rules::model::{Catalog, Predicate};

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(
        "apache",
        vec![
            super::rule(
                "TraceEnable",
                r"TraceEnable\s+(\w+)",
                Predicate::EqualsIgnoreCase("off"),
                "Disable HTTP TRACE",
                "TraceEnable Off",
            ),
            super::rule(
                "User",
                r"User\s+(\w+)",
                Predicate::NotEquals("root"),
                "Run the server as a non-root user",
                "User apache",
            ),
            super::rule(
                "Group",
                r"Group\s+(\w+)",
                Predicate::NotEquals("root"),
                "Run the server under a non-root group",
                "Group apache",
            ),
            super::rule(
                "ServerSignature",
                r"ServerSignature\s+(\w+)",
                Predicate::EqualsIgnoreCase("off"),
                "Disable the server signature",
                "ServerSignature Off",
            ),
            super::rule(
                "ServerTokens",
                r"ServerTokens\s+(\w+)",
                Predicate::EqualsIgnoreCase("prod"),
                "Hide the server banner",
                "ServerTokens Prod",
            ),
            super::rule(
                "SSLProtocol",
                r"SSLProtocol\s+(.+)",
                Predicate::ContainsAll(&["+TLSv1.2", "-ALL"]),
                "Allow TLS 1.2 only",
                "SSLProtocol -ALL +TLSv1.2",
            ),
            super::rule(
                "Options",
                r"Options\s+(.+)",
                Predicate::Contains("-Indexes"),
                "Disable directory listings",
                "Options -Indexes",
            ),
            super::rule(
                "SSLCipherSuite",
                r"SSLCipherSuite\s+(.+)",
                Predicate::Contains("ALL:!aNULL:!ADH:!eNULL:!LOW:!EXP:RC4-RSA:HIGH:MEDIUM"),
                "Disable weak cipher suites",
                "SSLCipherSuite ALL:!aNULL:!ADH:!eNULL:!LOW:!EXP:RC4-RSA:HIGH:MEDIUM",
            ),
            super::rule(
                "RequestReadTimeout",
                r"RequestReadTimeout\s+(.+)",
                Predicate::Contains("header=10-20"),
                "Bound the request read timeout",
                "RequestReadTimeout header=10-20,MinRate=500 body=20,MinRate=500",
            ),
            super::rule(
                "LimitRequestBody",
                r"LimitRequestBody\s+(\d+)",
                Predicate::IntAtMost(1_048_576),
                "Limit the size of HTTP request bodies",
                "LimitRequestBody 1048576",
            ),
            super::rule(
                "KeepAlive",
                r"KeepAlive\s+(\w+)",
                Predicate::EqualsIgnoreCase("on"),
                "Enable persistent connections",
                "KeepAlive On",
            ),
            super::rule(
                "MaxKeepAliveRequests",
                r"MaxKeepAliveRequests\s+(\d+)",
                Predicate::IntEquals(100),
                "Limit requests per persistent connection",
                "MaxKeepAliveRequests 100",
            ),
            super::rule(
                "KeepAliveTimeout",
                r"KeepAliveTimeout\s+(\d+)",
                Predicate::IntEquals(5),
                "Limit the KeepAlive timeout",
                "KeepAliveTimeout 5",
            ),
        ],
    )
});

pub fn catalog() -> &'static Catalog {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ConfigDocument;
    use crate::rules::{evaluate, Verdict};

    #[test]
    fn catalogue_holds_thirteen_rules() {
        assert_eq!(catalog().len(), 13);
        assert_eq!(catalog().id, "apache");
    }

    #[test]
    fn every_remediation_line_passes_its_own_rule() {
        let hardened: String = catalog()
            .rules
            .iter()
            .map(|r| format!("{}\n", r.remediation))
            .collect();
        let report = evaluate(catalog(), &ConfigDocument::from_text(&hardened));
        assert_eq!(report.score, 13.0);
    }

    #[test]
    fn running_as_root_is_misconfigured() {
        let doc = ConfigDocument::from_text("User root\nGroup www-data\n");
        let report = evaluate(catalog(), &doc);
        let user = report.entries.iter().find(|e| e.directive == "User").unwrap();
        let group = report
            .entries
            .iter()
            .find(|e| e.directive == "Group")
            .unwrap();
        assert_eq!(user.verdict, Verdict::Misconfigured);
        assert_eq!(group.verdict, Verdict::Compliant);
    }

    #[test]
    fn keepalive_rule_does_not_swallow_its_timeout() {
        let doc = ConfigDocument::from_text("KeepAliveTimeout 5\n");
        let report = evaluate(catalog(), &doc);
        let keepalive = report
            .entries
            .iter()
            .find(|e| e.directive == "KeepAlive")
            .unwrap();
        let timeout = report
            .entries
            .iter()
            .find(|e| e.directive == "KeepAliveTimeout")
            .unwrap();
        assert_eq!(keepalive.verdict, Verdict::Missing);
        assert_eq!(timeout.verdict, Verdict::Compliant);
    }

    #[test]
    fn ssl_protocol_needs_both_markers() {
        let doc = ConfigDocument::from_text("SSLProtocol +TLSv1.2\n");
        let report = evaluate(catalog(), &doc);
        let row = report
            .entries
            .iter()
            .find(|e| e.directive == "SSLProtocol")
            .unwrap();
        assert_eq!(row.verdict, Verdict::Misconfigured);
    }

    #[test]
    fn indented_directives_still_match() {
        let doc = ConfigDocument::from_text("<IfModule mpm_prefork_module>\n    TraceEnable Off\n</IfModule>\n");
        let report = evaluate(catalog(), &doc);
        assert_eq!(report.entries[0].verdict, Verdict::Compliant);
    }
}
