//! Hardening catalogue for OpenSSH server configuration (`sshd_config`).

use once_cell::sync::Lazy;

use crate::rules::model::{Catalog, Predicate};

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(
        "ssh",
        vec![
            super::rule(
                "PermitRootLogin",
                r"PermitRootLogin\s+(\w+)",
                Predicate::EqualsIgnoreCase("no"),
                "Disable direct root login",
                "PermitRootLogin no",
            ),
            super::rule(
                "Protocol",
                r"Protocol\s+(\d+)",
                Predicate::Equals("2"),
                "Use SSH protocol version 2 only",
                "Protocol 2",
            ),
            super::rule(
                "PasswordAuthentication",
                r"PasswordAuthentication\s+(\w+)",
                Predicate::EqualsIgnoreCase("no"),
                "Disable password authentication",
                "PasswordAuthentication no",
            ),
            super::rule(
                "PubkeyAuthentication",
                r"PubkeyAuthentication\s+(\w+)",
                Predicate::EqualsIgnoreCase("yes"),
                "Enable public key authentication",
                "PubkeyAuthentication yes",
            ),
            super::rule(
                "AllowUsers",
                r"AllowUsers\s+(.+)",
                Predicate::NonEmpty,
                "Restrict SSH access to named users",
                "AllowUsers user1 user2",
            ),
            super::rule(
                "MaxAuthTries",
                r"MaxAuthTries\s+(\d+)",
                Predicate::IntAtMost(3),
                "Limit authentication attempts",
                "MaxAuthTries 3",
            ),
            super::rule(
                "PermitEmptyPasswords",
                r"PermitEmptyPasswords\s+(\w+)",
                Predicate::EqualsIgnoreCase("no"),
                "Refuse logins for accounts without a password",
                "PermitEmptyPasswords no",
            ),
            super::rule(
                "AllowTcpForwarding",
                r"AllowTcpForwarding\s+(\w+)",
                Predicate::EqualsIgnoreCase("no"),
                "Disable TCP forwarding",
                "AllowTcpForwarding no",
            ),
            super::rule(
                "X11Forwarding",
                r"X11Forwarding\s+(\w+)",
                Predicate::EqualsIgnoreCase("no"),
                "Disable X11 forwarding",
                "X11Forwarding no",
            ),
            super::rule(
                "LoginGraceTime",
                r"LoginGraceTime\s+(\d+[smhd]?)",
                Predicate::SecondsAtMost(60),
                "Limit the login grace period",
                "LoginGraceTime 60s",
            ),
            super::rule(
                "MaxSessions",
                r"MaxSessions\s+(\d+)",
                Predicate::IntAtMost(10),
                "Limit concurrent sessions per connection",
                "MaxSessions 10",
            ),
            super::rule(
                "MaxStartups",
                r"MaxStartups\s+(.+)",
                Predicate::Equals("10:30:60"),
                "Throttle concurrent unauthenticated connections",
                "MaxStartups 10:30:60",
            ),
            super::rule(
                "Ciphers",
                r"Ciphers\s+(.+)",
                Predicate::Contains("aes256-ctr,aes192-ctr,aes128-ctr"),
                "Use modern SSH ciphers",
                "Ciphers aes256-ctr,aes192-ctr,aes128-ctr",
            ),
            super::rule(
                "HostKeyAlgorithms",
                r"HostKeyAlgorithms\s+(.+)",
                Predicate::Contains("ssh-ed25519,ecdsa-sha2-nistp521,ecdsa-sha2-nistp256"),
                "Use modern host key algorithms",
                "HostKeyAlgorithms ssh-ed25519,ecdsa-sha2-nistp521,ecdsa-sha2-nistp256",
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
    fn catalogue_holds_fourteen_rules() {
        assert_eq!(catalog().len(), 14);
        assert_eq!(catalog().id, "ssh");
    }

    #[test]
    fn every_remediation_line_passes_its_own_rule() {
        let hardened: String = catalog()
            .rules
            .iter()
            .map(|r| format!("{}\n", r.remediation))
            .collect();
        let report = evaluate(catalog(), &ConfigDocument::from_text(&hardened));
        assert_eq!(report.score, 14.0);
    }

    #[test]
    fn root_login_yes_is_misconfigured() {
        let doc = ConfigDocument::from_text("PermitRootLogin yes\n");
        let report = evaluate(catalog(), &doc);
        assert_eq!(report.entries[0].verdict, Verdict::Misconfigured);
    }

    #[test]
    fn compliant_and_absent_directives_report_separately() {
        let doc = ConfigDocument::from_text("PermitRootLogin no\nX11Forwarding no\n");
        let report = evaluate(catalog(), &doc);
        let root = report
            .entries
            .iter()
            .find(|e| e.directive == "PermitRootLogin")
            .unwrap();
        let password = report
            .entries
            .iter()
            .find(|e| e.directive == "PasswordAuthentication")
            .unwrap();
        assert_eq!(root.verdict, Verdict::Compliant);
        assert_eq!(password.verdict, Verdict::Missing);
    }

    #[test]
    fn commented_directive_does_not_match() {
        let doc = ConfigDocument::from_text("#PermitRootLogin no\n# PermitRootLogin no\n");
        let report = evaluate(catalog(), &doc);
        assert_eq!(report.entries[0].verdict, Verdict::Missing);
    }

    #[test]
    fn grace_time_suffix_values() {
        let doc = ConfigDocument::from_text("LoginGraceTime 2m\n");
        let report = evaluate(catalog(), &doc);
        let row = report
            .entries
            .iter()
            .find(|e| e.directive == "LoginGraceTime")
            .unwrap();
        assert_eq!(row.verdict, Verdict::Misconfigured);

        let doc = ConfigDocument::from_text("LoginGraceTime 45s\n");
        let report = evaluate(catalog(), &doc);
        let row = report
            .entries
            .iter()
            .find(|e| e.directive == "LoginGraceTime")
            .unwrap();
        assert_eq!(row.verdict, Verdict::Compliant);
    }
}
